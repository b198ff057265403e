//! User service - public profiles

use blog_core::value_objects::UserId;
use blog_core::DomainError;
use tracing::instrument;

use crate::dto::{PostListResponse, ProfileResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Public profile with follower/following counts
    #[instrument(skip(self))]
    pub async fn profile(&self, username: &str) -> ServiceResult<ProfileResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let (follower_count, following_count) = self.follow_counts(user.id).await?;

        Ok(ProfileResponse {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            bio: user.bio,
            avatar: user.avatar,
            follower_count,
            following_count,
            created_at: user.created_at,
        })
    }

    /// Published posts of a user, newest first
    #[instrument(skip(self))]
    pub async fn posts(&self, username: &str) -> ServiceResult<PostListResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let posts = self.ctx.post_repo().list_by_author(user.id, true).await?;
        let posts = PostService::new(self.ctx).with_authors(posts).await?;
        Ok(PostListResponse::unpaged(posts))
    }

    async fn follow_counts(&self, user_id: UserId) -> ServiceResult<(i64, i64)> {
        let follows = self.ctx.follow_repo();
        Ok((
            follows.count_followers(user_id).await?,
            follows.count_following(user_id).await?,
        ))
    }
}
