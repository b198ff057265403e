//! PostgreSQL implementation of TopicRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{NewTopic, Topic};
use blog_core::error::DomainError;
use blog_core::traits::{RepoResult, TopicRepository};
use blog_core::value_objects::UserId;

use crate::models::TopicModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of TopicRepository
#[derive(Clone)]
pub struct PgTopicRepository {
    pool: PgPool,
}

impl PgTopicRepository {
    /// Create a new PgTopicRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PgTopicRepository {
    #[instrument(skip(self))]
    async fn list(&self) -> RepoResult<Vec<Topic>> {
        let results = sqlx::query_as::<_, TopicModel>(
            r"
            SELECT id, name, slug, description, created_at, updated_at
            FROM topics
            ORDER BY name
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Topic::from).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Topic>> {
        let result = sqlx::query_as::<_, TopicModel>(
            r"
            SELECT id, name, slug, description, created_at, updated_at
            FROM topics
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Topic::from))
    }

    #[instrument(skip(self))]
    async fn name_or_slug_exists(&self, name: &str, slug: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM topics WHERE name = $1 OR slug = $2)
            ",
        )
        .bind(name)
        .bind(slug)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self, topic), fields(slug = %topic.slug))]
    async fn create(&self, topic: &NewTopic) -> RepoResult<Topic> {
        let result = sqlx::query_as::<_, TopicModel>(
            r"
            INSERT INTO topics (name, slug, description)
            VALUES ($1, $2, $3)
            RETURNING id, name, slug, description, created_at, updated_at
            ",
        )
        .bind(&topic.name)
        .bind(&topic.slug)
        .bind(&topic.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TopicExists))?;

        Ok(Topic::from(result))
    }

    #[instrument(skip(self))]
    async fn find_followed_by(&self, user_id: UserId) -> RepoResult<Vec<Topic>> {
        let results = sqlx::query_as::<_, TopicModel>(
            r"
            SELECT t.id, t.name, t.slug, t.description, t.created_at, t.updated_at
            FROM topics t
            INNER JOIN topic_follows tf ON tf.topic_id = t.id
            WHERE tf.user_id = $1 AND tf.deleted_at IS NULL
            ORDER BY t.name
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Topic::from).collect())
    }
}
