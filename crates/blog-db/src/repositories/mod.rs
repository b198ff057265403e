//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in blog-core.

mod comment;
mod error;
mod post;
mod relation;
mod token;
mod topic;
mod user;

pub use comment::PgCommentRepository;
pub use post::PgPostRepository;
pub use relation::{
    PgBookmarkRepository, PgFollowRepository, PgLikeRepository, PgTopicFollowRepository,
};
pub use token::{PgRefreshTokenRepository, PgRevokedTokenRepository};
pub use topic::PgTopicRepository;
pub use user::PgUserRepository;
