//! Axum extractors for request handling
//!
//! Custom extractors for authentication, validation, and pagination.

mod auth;
mod pagination;
mod path;
mod validated;

pub use auth::{bearer_token, AuthUser, OptionalAuthUser};
pub use pagination::{Pagination, PaginationParams};
pub use path::{IdPath, SlugPath};
pub use validated::ValidatedJson;
