//! Follow service - users following users

use blog_core::entities::User;
use blog_core::value_objects::UserId;
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{FollowStatusResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::relation::{activate, deactivate, is_active};

/// Follow service
pub struct FollowService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FollowService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, follower: UserId, username: &str) -> ServiceResult<MessageResponse> {
        let target = self.find_user(username).await?;
        if target.id == follower {
            return Err(DomainError::CannotFollowSelf.into());
        }

        activate(
            self.ctx.follow_repo(),
            follower,
            target.id,
            DomainError::AlreadyFollowingUser,
        )
        .await?;

        info!(follower = %follower, following = %target.id, "User followed");
        Ok(MessageResponse::new("Successfully followed user"))
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, follower: UserId, username: &str) -> ServiceResult<MessageResponse> {
        let target = self.find_user(username).await?;
        deactivate(
            self.ctx.follow_repo(),
            follower,
            target.id,
            DomainError::NotFollowingUser,
        )
        .await?;

        info!(follower = %follower, following = %target.id, "User unfollowed");
        Ok(MessageResponse::new("Successfully unfollowed user"))
    }

    #[instrument(skip(self))]
    pub async fn status(&self, follower: UserId, username: &str) -> ServiceResult<FollowStatusResponse> {
        let target = self.find_user(username).await?;
        Ok(FollowStatusResponse {
            following: is_active(self.ctx.follow_repo(), follower, target.id).await?,
        })
    }

    async fn find_user(&self, username: &str) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::UserNotFound.into())
    }
}
