//! Business logic services
//!
//! Each service borrows the shared `ServiceContext` for the duration of one
//! request and orchestrates repository calls for a single use case area.

pub mod auth;
pub mod bookmark;
pub mod comment;
pub mod context;
pub mod error;
pub mod follow;
pub mod like;
pub mod post;
mod relation;
pub mod topic;
pub mod user;

// Re-export all services for convenience
pub use auth::{AuthService, PurgeReport};
pub use bookmark::BookmarkService;
pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use follow::FollowService;
pub use like::LikeService;
pub use post::PostService;
pub use topic::TopicService;
pub use user::UserService;
