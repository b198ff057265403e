//! # blog-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::*;
pub use services::{
    AuthService, BookmarkService, CommentService, FollowService, LikeService, PostService,
    PurgeReport, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    TopicService, UserService,
};
