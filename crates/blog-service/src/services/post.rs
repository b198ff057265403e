//! Post service
//!
//! Authoring (create/update/delete), public listings, the single-post read
//! that counts views, and the follower feed.

use std::collections::HashMap;

use blog_core::entities::{NewPost, Post, User};
use blog_core::traits::PostQuery;
use blog_core::value_objects::{PostId, UserId};
use blog_core::{slugify, DomainError};
use chrono::Utc;
use tracing::{info, instrument};

use crate::dto::{CreatePostRequest, PostListResponse, PostResponse, UpdatePostRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post, published or as a draft
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn create(&self, author_id: UserId, request: CreatePostRequest) -> ServiceResult<PostResponse> {
        let slug = self.unique_slug(&request.title, None).await?;

        let mut new_post = NewPost::new(author_id, request.title, slug, request.content);
        new_post.excerpt = request.excerpt;
        new_post.cover_image = request.cover_image;
        new_post.tags = request.tags;
        if request.published {
            new_post.publish(Utc::now());
        }

        let post = self.ctx.post_repo().create(&new_post).await?;

        info!(post_id = %post.id, slug = %post.slug, "Post created");
        self.with_author(post).await
    }

    /// Partial update by the author
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: UserId,
        post_id: PostId,
        request: UpdatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let mut post = self.find_owned(user_id, post_id, "update").await?;
        let now = Utc::now();

        if let Some(title) = request.title {
            if title != post.title {
                post.slug = self.unique_slug(&title, Some(post.id)).await?;
                post.title = title;
            }
        }
        if let Some(content) = request.content {
            post.set_content(content);
        }
        if request.excerpt.is_some() {
            post.excerpt = request.excerpt;
        }
        if request.cover_image.is_some() {
            post.cover_image = request.cover_image;
        }
        if request.tags.is_some() {
            post.tags = request.tags;
        }
        match request.published {
            Some(true) => post.publish(now),
            Some(false) => post.published = false,
            None => {}
        }
        post.updated_at = now;

        self.ctx.post_repo().update(&post).await?;

        info!(post_id = %post.id, "Post updated");
        self.with_author(post).await
    }

    /// Soft delete by the author
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: UserId, post_id: PostId) -> ServiceResult<()> {
        let post = self.find_owned(user_id, post_id, "delete").await?;
        self.ctx.post_repo().delete(post.id).await?;

        info!(post_id = %post.id, "Post deleted");
        Ok(())
    }

    /// Published posts, paginated
    #[instrument(skip(self))]
    pub async fn list(&self, query: PostQuery) -> ServiceResult<PostListResponse> {
        let (posts, total) = self.ctx.post_repo().list_published(&query).await?;
        let posts = self.with_authors(posts).await?;
        Ok(PostListResponse::paged(posts, total, query.page, query.limit))
    }

    /// Read one post by slug, counting the view
    ///
    /// Drafts are only visible to their author; everyone else gets not-found.
    #[instrument(skip(self))]
    pub async fn get_by_slug(&self, slug: &str, viewer: Option<UserId>) -> ServiceResult<PostResponse> {
        let mut post = self
            .ctx
            .post_repo()
            .find_by_slug(slug)
            .await?
            .filter(|p| p.is_visible_to(viewer))
            .ok_or(DomainError::PostNotFound)?;

        post.view_count = self.ctx.post_repo().increment_views(post.id).await?;
        self.with_author(post).await
    }

    /// All of the caller's posts, drafts included
    #[instrument(skip(self))]
    pub async fn my_posts(&self, user_id: UserId) -> ServiceResult<PostListResponse> {
        let posts = self.ctx.post_repo().list_by_author(user_id, false).await?;
        Ok(PostListResponse::unpaged(self.with_authors(posts).await?))
    }

    /// Published posts by authors the caller follows
    #[instrument(skip(self))]
    pub async fn feed(&self, user_id: UserId, query: PostQuery) -> ServiceResult<PostListResponse> {
        let (posts, total) = self.ctx.post_repo().list_feed(user_id, &query).await?;
        let posts = self.with_authors(posts).await?;
        Ok(PostListResponse::paged(posts, total, query.page, query.limit))
    }

    /// Attach author profiles with one user lookup
    pub(crate) async fn with_authors(&self, posts: Vec<Post>) -> ServiceResult<Vec<PostResponse>> {
        let mut author_ids: Vec<UserId> = posts.iter().map(|p| p.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let authors: HashMap<UserId, User> = self
            .ctx
            .user_repo()
            .find_by_ids(&author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(posts
            .into_iter()
            .map(|post| {
                let author = authors.get(&post.author_id);
                PostResponse::with_author(post, author)
            })
            .collect())
    }

    async fn with_author(&self, post: Post) -> ServiceResult<PostResponse> {
        let author = self.ctx.user_repo().find_by_id(post.author_id).await?;
        Ok(PostResponse::with_author(post, author.as_ref()))
    }

    async fn find_owned(&self, user_id: UserId, post_id: PostId, action: &'static str) -> ServiceResult<Post> {
        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or(DomainError::PostNotFound)?;

        if !post.is_author(user_id) {
            return Err(DomainError::NotPostAuthor(action).into());
        }
        Ok(post)
    }

    /// Slug for `title`, suffixed with the current unix time if taken
    async fn unique_slug(&self, title: &str, exclude: Option<PostId>) -> ServiceResult<String> {
        let slug = slugify(title);
        if self.ctx.post_repo().slug_exists(&slug, exclude).await? {
            Ok(with_timestamp(&slug, Utc::now().timestamp()))
        } else {
            Ok(slug)
        }
    }
}

fn with_timestamp(slug: &str, unix_secs: i64) -> String {
    format!("{slug}-{unix_secs}")
}
