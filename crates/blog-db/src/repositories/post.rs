//! PostgreSQL implementation of PostRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{NewPost, Post};
use blog_core::error::DomainError;
use blog_core::traits::{PostQuery, PostRepository, PostSort, RepoResult};
use blog_core::value_objects::{PostId, UserId};

use crate::models::PostModel;

use super::error::{map_db_error, map_unique_violation};

const POST_COLUMNS: &str = "id, author_id, title, slug, content, excerpt, cover_image, tags, \
     published, view_count, read_time, created_at, updated_at, published_at, deleted_at";

fn order_by(sort: PostSort) -> &'static str {
    match sort {
        PostSort::Latest => "published_at DESC NULLS LAST, id DESC",
        PostSort::Views => "view_count DESC, id DESC",
    }
}

/// PostgreSQL implementation of PostRepository
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: PostId) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, slug, content, excerpt, cover_image, tags,
                   published, view_count, read_time, created_at, updated_at, published_at, deleted_at
            FROM posts
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_by_ids(&self, ids: &[PostId]) -> RepoResult<Vec<Post>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<i64> = ids.iter().map(|id| id.into_inner()).collect();

        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, slug, content, excerpt, cover_image, tags,
                   published, view_count, read_time, created_at, updated_at, published_at, deleted_at
            FROM posts
            WHERE id = ANY($1) AND deleted_at IS NULL
            ",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, slug, content, excerpt, cover_image, tags,
                   published, view_count, read_time, created_at, updated_at, published_at, deleted_at
            FROM posts
            WHERE slug = $1 AND deleted_at IS NULL
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn slug_exists(&self, slug: &str, exclude: Option<PostId>) -> RepoResult<bool> {
        // Removed posts keep their slug in the unique index.
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM posts WHERE slug = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            ",
        )
        .bind(slug)
        .bind(exclude.map(PostId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, post), fields(slug = %post.slug))]
    async fn create(&self, post: &NewPost) -> RepoResult<Post> {
        let result = sqlx::query_as::<_, PostModel>(
            r"
            INSERT INTO posts (author_id, title, slug, content, excerpt, cover_image, tags,
                               published, read_time, published_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, author_id, title, slug, content, excerpt, cover_image, tags,
                      published, view_count, read_time, created_at, updated_at, published_at, deleted_at
            ",
        )
        .bind(post.author_id.into_inner())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.cover_image)
        .bind(&post.tags)
        .bind(post.published)
        .bind(post.read_time)
        .bind(post.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugExists))?;

        Ok(Post::from(result))
    }

    #[instrument(skip(self, post), fields(post_id = %post.id))]
    async fn update(&self, post: &Post) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET title = $2, slug = $3, content = $4, excerpt = $5, cover_image = $6, tags = $7,
                published = $8, read_time = $9, published_at = $10, updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(post.id.into_inner())
        .bind(&post.title)
        .bind(&post.slug)
        .bind(&post.content)
        .bind(&post.excerpt)
        .bind(&post.cover_image)
        .bind(&post.tags)
        .bind(post.published)
        .bind(post.read_time)
        .bind(post.published_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::SlugExists))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: PostId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE posts
            SET deleted_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::PostNotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_views(&self, id: PostId) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            UPDATE posts
            SET view_count = view_count + 1
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING view_count
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.ok_or(DomainError::PostNotFound)
    }

    #[instrument(skip(self))]
    async fn list_published(&self, query: &PostQuery) -> RepoResult<(Vec<Post>, i64)> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE published AND deleted_at IS NULL \
             ORDER BY {} LIMIT $1 OFFSET $2",
            order_by(query.sort)
        );
        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM posts WHERE published AND deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((results.into_iter().map(Post::from).collect(), total))
    }

    #[instrument(skip(self))]
    async fn list_by_author(
        &self,
        author_id: UserId,
        published_only: bool,
    ) -> RepoResult<Vec<Post>> {
        let results = sqlx::query_as::<_, PostModel>(
            r"
            SELECT id, author_id, title, slug, content, excerpt, cover_image, tags,
                   published, view_count, read_time, created_at, updated_at, published_at, deleted_at
            FROM posts
            WHERE author_id = $1 AND deleted_at IS NULL AND (published OR NOT $2)
            ORDER BY created_at DESC, id DESC
            ",
        )
        .bind(author_id.into_inner())
        .bind(published_only)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }

    #[instrument(skip(self))]
    async fn list_feed(&self, follower: UserId, query: &PostQuery) -> RepoResult<(Vec<Post>, i64)> {
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts \
             WHERE published AND deleted_at IS NULL \
               AND author_id IN ( \
                   SELECT following_id FROM follows \
                   WHERE follower_id = $1 AND deleted_at IS NULL) \
             ORDER BY {} LIMIT $2 OFFSET $3",
            order_by(query.sort)
        );
        let results = sqlx::query_as::<_, PostModel>(&sql)
            .bind(follower.into_inner())
            .bind(query.limit)
            .bind(query.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        let total = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM posts
            WHERE published AND deleted_at IS NULL
              AND author_id IN (
                  SELECT following_id FROM follows
                  WHERE follower_id = $1 AND deleted_at IS NULL)
            ",
        )
        .bind(follower.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok((results.into_iter().map(Post::from).collect(), total))
    }
}
