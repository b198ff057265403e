//! Bookmark service

use blog_core::value_objects::{PostId, UserId};
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{BookmarkListResponse, BookmarkStatusResponse, MessageResponse};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::post::PostService;
use super::relation::{activate, deactivate, is_active};

/// Bookmark service
pub struct BookmarkService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BookmarkService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, user_id: UserId, post_id: PostId) -> ServiceResult<MessageResponse> {
        if self.ctx.post_repo().find_by_id(post_id).await?.is_none() {
            return Err(DomainError::PostNotFound.into());
        }
        activate(
            self.ctx.bookmark_repo(),
            user_id,
            post_id,
            DomainError::AlreadyBookmarked,
        )
        .await?;

        info!(user_id = %user_id, post_id = %post_id, "Post bookmarked");
        Ok(MessageResponse::new("Post bookmarked successfully"))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, user_id: UserId, post_id: PostId) -> ServiceResult<MessageResponse> {
        deactivate(
            self.ctx.bookmark_repo(),
            user_id,
            post_id,
            DomainError::BookmarkNotFound,
        )
        .await?;

        info!(user_id = %user_id, post_id = %post_id, "Bookmark removed");
        Ok(MessageResponse::new("Bookmark removed successfully"))
    }

    #[instrument(skip(self))]
    pub async fn status(&self, user_id: UserId, post_id: PostId) -> ServiceResult<BookmarkStatusResponse> {
        Ok(BookmarkStatusResponse {
            bookmarked: is_active(self.ctx.bookmark_repo(), user_id, post_id).await?,
        })
    }

    /// The caller's bookmarked posts, newest bookmark first
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: UserId) -> ServiceResult<BookmarkListResponse> {
        let bookmarks = self.ctx.bookmark_repo().list_by_user(user_id).await?;
        let post_ids: Vec<PostId> = bookmarks.iter().map(|b| b.target).collect();

        // find_by_ids does not keep order
        let mut posts = self.ctx.post_repo().find_by_ids(&post_ids).await?;
        posts.retain(|p| p.is_visible_to(Some(user_id)));
        posts.sort_by_key(|p| post_ids.iter().position(|id| *id == p.id));

        let posts = PostService::new(self.ctx).with_authors(posts).await?;
        Ok(BookmarkListResponse {
            total: posts.len() as i64,
            bookmarks: posts,
        })
    }
}
