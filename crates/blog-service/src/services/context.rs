//! Service context - dependency container for services
//!
//! Holds all repositories plus the token and password services.

use std::sync::Arc;

use blog_common::auth::{JwtService, PasswordService};
use blog_core::traits::{
    BookmarkRepository, CommentRepository, FollowRepository, LikeRepository, PostRepository,
    RefreshTokenRepository, RevokedTokenRepository, TopicFollowRepository, TopicRepository,
    UserRepository,
};

use super::error::{ServiceError, ServiceResult};

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
/// Repositories are trait objects so the storage backend can be swapped
/// (PostgreSQL in production, in-memory stores in tests).
#[derive(Clone)]
pub struct ServiceContext {
    // Identity and session stores
    user_repo: Arc<dyn UserRepository>,
    refresh_token_repo: Arc<dyn RefreshTokenRepository>,
    revoked_token_repo: Arc<dyn RevokedTokenRepository>,

    // Content
    post_repo: Arc<dyn PostRepository>,
    comment_repo: Arc<dyn CommentRepository>,
    topic_repo: Arc<dyn TopicRepository>,

    // Relations
    like_repo: Arc<dyn LikeRepository>,
    bookmark_repo: Arc<dyn BookmarkRepository>,
    follow_repo: Arc<dyn FollowRepository>,
    topic_follow_repo: Arc<dyn TopicFollowRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    password_service: PasswordService,
}

impl ServiceContext {
    /// Start building a context
    pub fn builder() -> ServiceContextBuilder {
        ServiceContextBuilder::new()
    }

    // === Repositories ===

    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    pub fn refresh_token_repo(&self) -> &dyn RefreshTokenRepository {
        self.refresh_token_repo.as_ref()
    }

    pub fn revoked_token_repo(&self) -> &dyn RevokedTokenRepository {
        self.revoked_token_repo.as_ref()
    }

    pub fn post_repo(&self) -> &dyn PostRepository {
        self.post_repo.as_ref()
    }

    pub fn comment_repo(&self) -> &dyn CommentRepository {
        self.comment_repo.as_ref()
    }

    pub fn topic_repo(&self) -> &dyn TopicRepository {
        self.topic_repo.as_ref()
    }

    pub fn like_repo(&self) -> &dyn LikeRepository {
        self.like_repo.as_ref()
    }

    pub fn bookmark_repo(&self) -> &dyn BookmarkRepository {
        self.bookmark_repo.as_ref()
    }

    pub fn follow_repo(&self) -> &dyn FollowRepository {
        self.follow_repo.as_ref()
    }

    pub fn topic_follow_repo(&self) -> &dyn TopicFollowRepository {
        self.topic_follow_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the password hasher
    pub fn password_service(&self) -> &PasswordService {
        &self.password_service
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("repositories", &"...")
            .field("jwt_service", &self.jwt_service)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext
#[derive(Default)]
pub struct ServiceContextBuilder {
    user_repo: Option<Arc<dyn UserRepository>>,
    refresh_token_repo: Option<Arc<dyn RefreshTokenRepository>>,
    revoked_token_repo: Option<Arc<dyn RevokedTokenRepository>>,
    post_repo: Option<Arc<dyn PostRepository>>,
    comment_repo: Option<Arc<dyn CommentRepository>>,
    topic_repo: Option<Arc<dyn TopicRepository>>,
    like_repo: Option<Arc<dyn LikeRepository>>,
    bookmark_repo: Option<Arc<dyn BookmarkRepository>>,
    follow_repo: Option<Arc<dyn FollowRepository>>,
    topic_follow_repo: Option<Arc<dyn TopicFollowRepository>>,
    jwt_service: Option<Arc<JwtService>>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn refresh_token_repo(mut self, repo: Arc<dyn RefreshTokenRepository>) -> Self {
        self.refresh_token_repo = Some(repo);
        self
    }

    pub fn revoked_token_repo(mut self, repo: Arc<dyn RevokedTokenRepository>) -> Self {
        self.revoked_token_repo = Some(repo);
        self
    }

    pub fn post_repo(mut self, repo: Arc<dyn PostRepository>) -> Self {
        self.post_repo = Some(repo);
        self
    }

    pub fn comment_repo(mut self, repo: Arc<dyn CommentRepository>) -> Self {
        self.comment_repo = Some(repo);
        self
    }

    pub fn topic_repo(mut self, repo: Arc<dyn TopicRepository>) -> Self {
        self.topic_repo = Some(repo);
        self
    }

    pub fn like_repo(mut self, repo: Arc<dyn LikeRepository>) -> Self {
        self.like_repo = Some(repo);
        self
    }

    pub fn bookmark_repo(mut self, repo: Arc<dyn BookmarkRepository>) -> Self {
        self.bookmark_repo = Some(repo);
        self
    }

    pub fn follow_repo(mut self, repo: Arc<dyn FollowRepository>) -> Self {
        self.follow_repo = Some(repo);
        self
    }

    pub fn topic_follow_repo(mut self, repo: Arc<dyn TopicFollowRepository>) -> Self {
        self.topic_follow_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::MissingDependency` naming the first unset field
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext {
            user_repo: required(self.user_repo, "user_repo")?,
            refresh_token_repo: required(self.refresh_token_repo, "refresh_token_repo")?,
            revoked_token_repo: required(self.revoked_token_repo, "revoked_token_repo")?,
            post_repo: required(self.post_repo, "post_repo")?,
            comment_repo: required(self.comment_repo, "comment_repo")?,
            topic_repo: required(self.topic_repo, "topic_repo")?,
            like_repo: required(self.like_repo, "like_repo")?,
            bookmark_repo: required(self.bookmark_repo, "bookmark_repo")?,
            follow_repo: required(self.follow_repo, "follow_repo")?,
            topic_follow_repo: required(self.topic_follow_repo, "topic_follow_repo")?,
            jwt_service: required(self.jwt_service, "jwt_service")?,
            password_service: PasswordService::new(),
        })
    }
}

fn required<T>(value: Option<T>, name: &'static str) -> ServiceResult<T> {
    value.ok_or(ServiceError::MissingDependency(name))
}
