//! Like service

use blog_core::value_objects::{PostId, UserId};
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{LikeCountResponse, LikeResponse, LikeStatusResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::relation::{activate, deactivate, is_active};

/// Like service
pub struct LikeService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> LikeService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn like(&self, user_id: UserId, post_id: PostId) -> ServiceResult<LikeResponse> {
        self.require_post(post_id).await?;
        activate(self.ctx.like_repo(), user_id, post_id, DomainError::AlreadyLiked).await?;

        info!(user_id = %user_id, post_id = %post_id, "Post liked");
        Ok(LikeResponse {
            message: "Post liked successfully".to_string(),
            like_count: self.count(post_id).await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn unlike(&self, user_id: UserId, post_id: PostId) -> ServiceResult<LikeResponse> {
        deactivate(self.ctx.like_repo(), user_id, post_id, DomainError::LikeNotFound).await?;

        info!(user_id = %user_id, post_id = %post_id, "Like removed");
        Ok(LikeResponse {
            message: "Like removed successfully".to_string(),
            like_count: self.count(post_id).await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn status(&self, user_id: UserId, post_id: PostId) -> ServiceResult<LikeStatusResponse> {
        Ok(LikeStatusResponse {
            liked: is_active(self.ctx.like_repo(), user_id, post_id).await?,
            like_count: self.count(post_id).await?,
        })
    }

    #[instrument(skip(self))]
    pub async fn like_count(&self, post_id: PostId) -> ServiceResult<LikeCountResponse> {
        Ok(LikeCountResponse {
            like_count: self.count(post_id).await?,
        })
    }

    async fn count(&self, post_id: PostId) -> ServiceResult<i64> {
        Ok(self.ctx.like_repo().count_by_post(post_id).await?)
    }

    async fn require_post(&self, post_id: PostId) -> ServiceResult<()> {
        self.ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .map(|_| ())
            .ok_or_else(|| DomainError::PostNotFound.into())
    }
}
