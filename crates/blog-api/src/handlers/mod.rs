//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod auth;
pub mod bookmarks;
pub mod comments;
pub mod follows;
pub mod health;
pub mod likes;
pub mod posts;
pub mod topics;
pub mod users;
