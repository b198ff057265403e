//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
///
/// Display strings are the user-facing messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("User not found")]
    UserNotFound,

    #[error("Post not found")]
    PostNotFound,

    #[error("Comment not found")]
    CommentNotFound,

    #[error("Parent comment not found")]
    ParentCommentNotFound,

    #[error("Topic not found")]
    TopicNotFound,

    #[error("Like not found")]
    LikeNotFound,

    #[error("Bookmark not found")]
    BookmarkNotFound,

    #[error("Not following this user")]
    NotFollowingUser,

    #[error("Not following this topic")]
    NotFollowingTopic,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("{0}")]
    ValidationError(String),

    #[error("Invalid email format")]
    InvalidEmail,

    #[error("Invalid username: {0}")]
    InvalidUsername(String),

    #[error("Password too weak: {0}")]
    WeakPassword(String),

    #[error("Cannot follow yourself")]
    CannotFollowSelf,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("You can only {0} your own posts")]
    NotPostAuthor(&'static str),

    #[error("You can only {0} your own comments")]
    NotCommentAuthor(&'static str),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email or username already exists")]
    EmailOrUsernameExists,

    #[error("Post slug already exists")]
    SlugExists,

    #[error("Topic already exists")]
    TopicExists,

    #[error("Post already liked")]
    AlreadyLiked,

    #[error("Post already bookmarked")]
    AlreadyBookmarked,

    #[error("Already following this user")]
    AlreadyFollowingUser,

    #[error("Already following this topic")]
    AlreadyFollowingTopic,

    #[error("Refresh token already exists")]
    RefreshTokenExists,

    #[error("Token already revoked")]
    TokenAlreadyRevoked,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::UserNotFound => "UNKNOWN_USER",
            Self::PostNotFound => "UNKNOWN_POST",
            Self::CommentNotFound => "UNKNOWN_COMMENT",
            Self::ParentCommentNotFound => "UNKNOWN_PARENT_COMMENT",
            Self::TopicNotFound => "UNKNOWN_TOPIC",
            Self::LikeNotFound => "UNKNOWN_LIKE",
            Self::BookmarkNotFound => "UNKNOWN_BOOKMARK",
            Self::NotFollowingUser => "NOT_FOLLOWING",
            Self::NotFollowingTopic => "NOT_FOLLOWING_TOPIC",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidUsername(_) => "INVALID_USERNAME",
            Self::WeakPassword(_) => "WEAK_PASSWORD",
            Self::CannotFollowSelf => "CANNOT_FOLLOW_SELF",

            // Authorization
            Self::NotPostAuthor(_) => "NOT_POST_AUTHOR",
            Self::NotCommentAuthor(_) => "NOT_COMMENT_AUTHOR",

            // Conflict
            Self::EmailOrUsernameExists => "USER_ALREADY_EXISTS",
            Self::SlugExists => "SLUG_ALREADY_EXISTS",
            Self::TopicExists => "TOPIC_ALREADY_EXISTS",
            Self::AlreadyLiked => "ALREADY_LIKED",
            Self::AlreadyBookmarked => "ALREADY_BOOKMARKED",
            Self::AlreadyFollowingUser => "ALREADY_FOLLOWING",
            Self::AlreadyFollowingTopic => "ALREADY_FOLLOWING_TOPIC",
            Self::RefreshTokenExists => "REFRESH_TOKEN_EXISTS",
            Self::TokenAlreadyRevoked => "TOKEN_ALREADY_REVOKED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound
                | Self::PostNotFound
                | Self::CommentNotFound
                | Self::ParentCommentNotFound
                | Self::TopicNotFound
                | Self::LikeNotFound
                | Self::BookmarkNotFound
                | Self::NotFollowingUser
                | Self::NotFollowingTopic
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidEmail
                | Self::InvalidUsername(_)
                | Self::WeakPassword(_)
                | Self::CannotFollowSelf
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::NotPostAuthor(_) | Self::NotCommentAuthor(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailOrUsernameExists
                | Self::SlugExists
                | Self::TopicExists
                | Self::AlreadyLiked
                | Self::AlreadyBookmarked
                | Self::AlreadyFollowingUser
                | Self::AlreadyFollowingTopic
                | Self::RefreshTokenExists
                | Self::TokenAlreadyRevoked
        )
    }
}
