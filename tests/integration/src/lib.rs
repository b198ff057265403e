//! Integration test utilities for the blog server
//!
//! Two harnesses:
//! - [`app`] drives the real router in-process with in-memory credential
//!   and session stores, so the auth flows run without a database.
//! - [`helpers`] spawns a full server against PostgreSQL and talks to it
//!   over HTTP with `reqwest`.

pub mod app;
pub mod fixtures;
pub mod helpers;

pub use app::*;
pub use fixtures::*;
pub use helpers::*;
