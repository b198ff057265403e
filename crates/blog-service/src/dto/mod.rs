//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateCommentRequest, CreatePostRequest, CreateTopicRequest, LoginRequest, LogoutRequest,
    RefreshTokenRequest, RegisterRequest, UpdateCommentRequest, UpdatePostRequest,
};

pub use responses::{
    BookmarkListResponse, BookmarkStatusResponse, CommentEnvelope, CommentListResponse,
    CommentResponse, FollowStatusResponse, HealthResponse, LikeCountResponse, LikeResponse,
    LikeStatusResponse, LoginResponse, MessageResponse, PostEnvelope, PostListResponse,
    PostResponse, ProfileResponse, PublicUserResponse, ReadinessResponse, RefreshResponse,
    RegisterResponse, TopicDetailResponse, TopicEnvelope, TopicListResponse, TopicResponse,
    UserEnvelope, UserResponse,
};
