//! Comment service
//!
//! Comments form a two-level thread: top-level comments carry their direct
//! replies.

use std::collections::HashMap;

use blog_core::entities::{Comment, NewComment, User};
use blog_core::value_objects::{CommentId, PostId, UserId};
use blog_core::DomainError;
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{CommentListResponse, CommentResponse, CreateCommentRequest, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Thread of a post
    #[instrument(skip(self))]
    pub async fn list(&self, post_id: PostId) -> ServiceResult<CommentListResponse> {
        self.require_post(post_id).await?;

        let comments = self.ctx.comment_repo().list_by_post(post_id).await?;
        let total = self.ctx.comment_repo().count_by_post(post_id).await?;
        let users = self.users_for(&comments).await?;

        Ok(CommentListResponse {
            comments: build_thread(comments, &users),
            total,
        })
    }

    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: UserId,
        post_id: PostId,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.require_post(post_id).await?;

        if let Some(parent_id) = request.parent_id {
            let parent = self.ctx.comment_repo().find_by_id(parent_id).await?;
            if !parent.is_some_and(|p| p.post_id == post_id) {
                return Err(DomainError::ParentCommentNotFound.into());
            }
        }

        let comment = self
            .ctx
            .comment_repo()
            .create(&NewComment {
                post_id,
                user_id,
                parent_id: request.parent_id,
                content: request.content,
            })
            .await?;

        info!(comment_id = %comment.id, post_id = %post_id, "Comment created");
        self.with_user(comment).await
    }

    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        comment_id: CommentId,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let mut comment = self.find_owned(user_id, comment_id, "update").await?;
        comment.content = request.content;
        comment.updated_at = Utc::now();

        self.ctx.comment_repo().update(&comment).await?;

        info!(comment_id = %comment.id, "Comment updated");
        self.with_user(comment).await
    }

    /// Soft delete the comment and its replies
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, comment_id: CommentId) -> ServiceResult<()> {
        let comment = self.find_owned(user_id, comment_id, "delete").await?;
        let removed = self.ctx.comment_repo().delete_with_replies(comment.id).await?;

        info!(comment_id = %comment.id, removed, "Comment deleted");
        Ok(())
    }

    async fn require_post(&self, post_id: PostId) -> ServiceResult<()> {
        match self.ctx.post_repo().find_by_id(post_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::PostNotFound.into()),
        }
    }

    async fn find_owned(
        &self,
        user_id: UserId,
        comment_id: CommentId,
        action: &'static str,
    ) -> ServiceResult<Comment> {
        let comment = self
            .ctx
            .comment_repo()
            .find_by_id(comment_id)
            .await?
            .ok_or(DomainError::CommentNotFound)?;

        if !comment.is_author(user_id) {
            return Err(DomainError::NotCommentAuthor(action).into());
        }
        Ok(comment)
    }

    async fn users_for(&self, comments: &[Comment]) -> ServiceResult<HashMap<UserId, User>> {
        let mut ids: Vec<UserId> = comments.iter().map(|c| c.user_id).collect();
        ids.sort_unstable();
        ids.dedup();

        Ok(self
            .ctx
            .user_repo()
            .find_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect())
    }

    async fn with_user(&self, comment: Comment) -> ServiceResult<CommentResponse> {
        let user = self.ctx.user_repo().find_by_id(comment.user_id).await?;
        Ok(CommentResponse::with_user(comment, user.as_ref()))
    }
}

/// Group comments (oldest first) into top-level comments, newest first,
/// each holding its direct replies oldest first. Replies to replies are
/// not shown in the thread.
fn build_thread(comments: Vec<Comment>, users: &HashMap<UserId, User>) -> Vec<CommentResponse> {
    let (top_level, replies): (Vec<Comment>, Vec<Comment>) =
        comments.into_iter().partition(|c| !c.is_reply());

    let mut replies_by_parent: HashMap<CommentId, Vec<CommentResponse>> = HashMap::new();
    for reply in replies {
        if let Some(parent_id) = reply.parent_id {
            let user = users.get(&reply.user_id);
            replies_by_parent
                .entry(parent_id)
                .or_default()
                .push(CommentResponse::with_user(reply, user));
        }
    }

    top_level
        .into_iter()
        .rev()
        .map(|comment| {
            let replies = replies_by_parent.remove(&comment.id).unwrap_or_default();
            let user = users.get(&comment.user_id);
            let mut response = CommentResponse::with_user(comment, user);
            response.replies = Some(replies);
            response
        })
        .collect()
}
