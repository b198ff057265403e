//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Ids are serialized as JSON numbers.

use blog_core::value_objects::{CommentId, PostId, TopicId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Plain `{"message": ...}` acknowledgement
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Auth Responses
// ============================================================================

/// Registration result; no tokens are issued until login
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

impl RegisterResponse {
    pub fn new(user: UserResponse) -> Self {
        Self {
            message: "Registration successful. Please login to continue.".to_string(),
            user,
        }
    }
}

/// Login result with both tokens
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

impl LoginResponse {
    pub fn new(
        access_token: String,
        refresh_token: String,
        expires_in: i64,
        user: UserResponse,
    ) -> Self {
        Self {
            access_token,
            refresh_token,
            token_type: "Bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Refresh result; the refresh token itself is not rotated
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl RefreshResponse {
    pub fn new(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// The caller's own account (includes email)
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public user fields shown as an author
#[derive(Debug, Clone, Serialize)]
pub struct PublicUserResponse {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
    pub avatar: Option<String>,
}

/// Public profile with follow counts
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub follower_count: i64,
    pub following_count: i64,
    pub created_at: DateTime<Utc>,
}

/// `{"user": ...}`
#[derive(Debug, Serialize)]
pub struct UserEnvelope<T> {
    pub user: T,
}

impl<T> UserEnvelope<T> {
    pub fn new(user: T) -> Self {
        Self { user }
    }
}

// ============================================================================
// Post Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub cover_image: Option<String>,
    pub tags: Option<String>,
    pub published: bool,
    pub view_count: i64,
    pub read_time: i32,
    /// `None` only if the author account is gone
    pub author: Option<PublicUserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

/// `{"post": ...}`
#[derive(Debug, Serialize)]
pub struct PostEnvelope {
    pub post: PostResponse,
}

/// A list of posts; `page` and `limit` are present for paginated listings
#[derive(Debug, Serialize)]
pub struct PostListResponse {
    pub posts: Vec<PostResponse>,
    pub total: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl PostListResponse {
    pub fn unpaged(posts: Vec<PostResponse>) -> Self {
        Self {
            total: posts.len() as i64,
            posts,
            page: None,
            limit: None,
        }
    }

    pub fn paged(posts: Vec<PostResponse>, total: i64, page: i64, limit: i64) -> Self {
        Self {
            posts,
            total,
            page: Some(page),
            limit: Some(limit),
        }
    }
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: CommentId,
    pub post_id: PostId,
    pub parent_id: Option<CommentId>,
    pub content: String,
    pub user: Option<PublicUserResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Direct replies, oldest first; omitted on replies themselves
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replies: Option<Vec<CommentResponse>>,
}

/// `{"comment": ...}`
#[derive(Debug, Serialize)]
pub struct CommentEnvelope {
    pub comment: CommentResponse,
}

/// Comment thread of a post; `total` counts replies too
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentResponse>,
    pub total: i64,
}

// ============================================================================
// Relation Responses
// ============================================================================

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub message: String,
    pub like_count: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeStatusResponse {
    pub liked: bool,
    pub like_count: i64,
}

#[derive(Debug, Serialize)]
pub struct LikeCountResponse {
    pub like_count: i64,
}

#[derive(Debug, Serialize)]
pub struct BookmarkStatusResponse {
    pub bookmarked: bool,
}

/// Bookmarked posts, newest bookmark first
#[derive(Debug, Serialize)]
pub struct BookmarkListResponse {
    pub bookmarks: Vec<PostResponse>,
    pub total: i64,
}

/// Whether the caller follows a user or topic
#[derive(Debug, Serialize)]
pub struct FollowStatusResponse {
    pub following: bool,
}

// ============================================================================
// Topic Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TopicResponse {
    pub id: TopicId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// `{"topic": ...}`
#[derive(Debug, Serialize)]
pub struct TopicEnvelope {
    pub topic: TopicResponse,
}

/// A topic with its follower count
#[derive(Debug, Serialize)]
pub struct TopicDetailResponse {
    pub topic: TopicResponse,
    pub follower_count: i64,
}

/// A list of topics; `total` is present for the caller's followed topics
#[derive(Debug, Serialize)]
pub struct TopicListResponse {
    pub topics: Vec<TopicResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<i64>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Liveness probe body
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(version: impl Into<String>) -> Self {
        Self {
            status: "healthy",
            version: version.into(),
        }
    }
}

/// Readiness probe body
#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    pub database: &'static str,
}

impl ReadinessResponse {
    pub fn from_database(database_up: bool) -> Self {
        if database_up {
            Self {
                status: "ready",
                database: "up",
            }
        } else {
            Self {
                status: "not_ready",
                database: "down",
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        self.database == "up"
    }
}
