//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Reads never return soft-deleted rows unless
//! the method says otherwise.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Bookmark, Comment, NewComment, NewPost, NewTopic, NewUser, Post, RefreshToken, Relation,
    RevokedToken, Topic, User,
};
use crate::error::DomainError;
use crate::value_objects::{CommentId, PostId, TopicId, UserId};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Credential Store
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find an active user by ID
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>>;

    /// Find active users by ID, in no particular order
    async fn find_by_ids(&self, ids: &[UserId]) -> RepoResult<Vec<User>>;

    /// Find user by (already normalized) email
    async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>>;

    /// Find user by username
    async fn find_by_username(&self, username: &str) -> RepoResult<Option<User>>;

    /// Single combined check used by registration
    async fn email_or_username_exists(&self, email: &str, username: &str) -> RepoResult<bool>;

    /// Create a new user.
    ///
    /// A unique violation on email or username maps to
    /// `DomainError::EmailOrUsernameExists`.
    async fn create(&self, user: &NewUser, password_hash: &str) -> RepoResult<User>;

    /// Get password hash for authentication
    async fn get_password_hash(&self, id: UserId) -> RepoResult<Option<String>>;

    /// Soft delete a user and drop their refresh tokens
    async fn soft_delete(&self, id: UserId) -> RepoResult<()>;
}

// ============================================================================
// Session stores
// ============================================================================

#[async_trait]
pub trait RefreshTokenRepository: Send + Sync {
    /// Persist an issued refresh token.
    ///
    /// Fails with `DomainError::RefreshTokenExists` if the token string is already stored.
    async fn create(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken>;

    /// Find a token matching value and owner that is still live at `now`.
    /// A lapsed row is indistinguishable from a missing one.
    async fn find_valid(
        &self,
        token: &str,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<RefreshToken>>;

    /// Delete a token. Deleting an absent token is not an error.
    async fn delete(&self, token: &str) -> RepoResult<()>;

    /// Delete every token a user holds
    async fn delete_by_user(&self, user_id: UserId) -> RepoResult<u64>;

    /// Delete rows that lapsed before `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

#[async_trait]
pub trait RevokedTokenRepository: Send + Sync {
    /// Record a revoked access token.
    ///
    /// Fails with `DomainError::TokenAlreadyRevoked` if it was revoked before;
    /// callers treat that as success.
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> RepoResult<RevokedToken>;

    async fn is_revoked(&self, token: &str) -> RepoResult<bool>;

    /// Delete records whose token expired before `now`
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64>;
}

// ============================================================================
// Post Repository
// ============================================================================

/// Ordering for public post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PostSort {
    /// `published_at` descending
    #[default]
    Latest,
    /// `view_count` descending
    Views,
}

/// Pagination options for post listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub page: i64,
    pub limit: i64,
    pub sort: PostSort,
}

impl PostQuery {
    pub const DEFAULT_LIMIT: i64 = 10;
    pub const MAX_LIMIT: i64 = 100;

    /// Clamp raw query values: page defaults to 1, out-of-range limits to 10
    pub fn new(page: Option<i64>, limit: Option<i64>, sort: PostSort) -> Self {
        let page = page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = limit
            .filter(|l| (1..=Self::MAX_LIMIT).contains(l))
            .unwrap_or(Self::DEFAULT_LIMIT);
        Self { page, limit, sort }
    }

    #[inline]
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl Default for PostQuery {
    fn default() -> Self {
        Self::new(None, None, PostSort::Latest)
    }
}

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>>;

    async fn find_by_ids(&self, ids: &[PostId]) -> RepoResult<Vec<Post>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Post>>;

    /// Check whether a slug is taken, optionally ignoring one post
    async fn slug_exists(&self, slug: &str, exclude: Option<PostId>) -> RepoResult<bool>;

    /// Create a new post. A slug collision maps to `DomainError::SlugExists`.
    async fn create(&self, post: &NewPost) -> RepoResult<Post>;

    async fn update(&self, post: &Post) -> RepoResult<()>;

    /// Soft delete a post
    async fn delete(&self, id: PostId) -> RepoResult<()>;

    /// Bump the view counter, returning the new count
    async fn increment_views(&self, id: PostId) -> RepoResult<i64>;

    /// Published posts, page plus total count
    async fn list_published(&self, query: &PostQuery) -> RepoResult<(Vec<Post>, i64)>;

    /// Posts by one author, newest first
    async fn list_by_author(&self, author_id: UserId, published_only: bool)
        -> RepoResult<Vec<Post>>;

    /// Published posts by authors `follower` actively follows
    async fn list_feed(&self, follower: UserId, query: &PostQuery)
        -> RepoResult<(Vec<Post>, i64)>;
}

// ============================================================================
// Comment Repository
// ============================================================================

#[async_trait]
pub trait CommentRepository: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> RepoResult<Option<Comment>>;

    /// All active comments on a post, oldest first
    async fn list_by_post(&self, post_id: PostId) -> RepoResult<Vec<Comment>>;

    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64>;

    async fn create(&self, comment: &NewComment) -> RepoResult<Comment>;

    async fn update(&self, comment: &Comment) -> RepoResult<()>;

    /// Soft delete a comment together with its direct replies
    async fn delete_with_replies(&self, id: CommentId) -> RepoResult<u64>;
}

// ============================================================================
// Relations
// ============================================================================

/// Storage for a soft-deletable `(subject, target)` pair
#[async_trait]
pub trait RelationRepository<S, T>: Send + Sync
where
    S: Copy + Send + Sync + 'static,
    T: Copy + Send + Sync + 'static,
{
    /// Find the pair, including a removed row
    async fn find(&self, subject: S, target: T) -> RepoResult<Option<Relation<S, T>>>;

    /// Insert a fresh active row
    async fn create(&self, subject: S, target: T) -> RepoResult<Relation<S, T>>;

    /// `Removed -> Active`
    async fn restore(&self, subject: S, target: T) -> RepoResult<()>;

    /// `Active -> Removed`. Returns false when there was no active row.
    async fn remove(&self, subject: S, target: T) -> RepoResult<bool>;
}

#[async_trait]
pub trait LikeRepository: RelationRepository<UserId, PostId> {
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64>;
}

#[async_trait]
pub trait BookmarkRepository: RelationRepository<UserId, PostId> {
    /// Active bookmarks, most recent first
    async fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Bookmark>>;
}

#[async_trait]
pub trait FollowRepository: RelationRepository<UserId, UserId> {
    async fn count_followers(&self, user_id: UserId) -> RepoResult<i64>;

    async fn count_following(&self, user_id: UserId) -> RepoResult<i64>;
}

#[async_trait]
pub trait TopicFollowRepository: RelationRepository<UserId, TopicId> {
    async fn count_followers(&self, topic_id: TopicId) -> RepoResult<i64>;
}

// ============================================================================
// Topic Repository
// ============================================================================

#[async_trait]
pub trait TopicRepository: Send + Sync {
    /// All topics ordered by name
    async fn list(&self) -> RepoResult<Vec<Topic>>;

    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Topic>>;

    async fn name_or_slug_exists(&self, name: &str, slug: &str) -> RepoResult<bool>;

    /// Create a topic. A unique violation maps to `DomainError::TopicExists`.
    async fn create(&self, topic: &NewTopic) -> RepoResult<Topic>;

    /// Topics a user actively follows, ordered by name
    async fn find_followed_by(&self, user_id: UserId) -> RepoResult<Vec<Topic>>;
}
