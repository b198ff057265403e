//! PostgreSQL implementations of the relation repositories
//!
//! Likes, bookmarks, follows and topic follows share one table shape:
//! a composite `(subject, target)` primary key, `created_at` and a
//! nullable `deleted_at` tombstone. `RelationTable` holds the SQL for one
//! such table; each repository wraps a pool and a static table description.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{Bookmark, Relation};
use blog_core::error::DomainError;
use blog_core::traits::{
    BookmarkRepository, FollowRepository, LikeRepository, RelationRepository, RepoResult,
    TopicFollowRepository,
};
use blog_core::value_objects::{PostId, TopicId, UserId};

use crate::models::RelationModel;

use super::error::{map_db_error, map_unique_violation};

/// Column layout of a relation table
struct RelationTable {
    table: &'static str,
    subject: &'static str,
    target: &'static str,
}

const LIKES: RelationTable = RelationTable {
    table: "likes",
    subject: "user_id",
    target: "post_id",
};

const BOOKMARKS: RelationTable = RelationTable {
    table: "bookmarks",
    subject: "user_id",
    target: "post_id",
};

const FOLLOWS: RelationTable = RelationTable {
    table: "follows",
    subject: "follower_id",
    target: "following_id",
};

const TOPIC_FOLLOWS: RelationTable = RelationTable {
    table: "topic_follows",
    subject: "user_id",
    target: "topic_id",
};

impl RelationTable {
    fn select(&self) -> String {
        format!(
            "SELECT {s} AS subject_id, {t} AS target_id, created_at, deleted_at FROM {table}",
            s = self.subject,
            t = self.target,
            table = self.table,
        )
    }

    async fn find(&self, pool: &PgPool, subject: i64, target: i64) -> RepoResult<Option<RelationModel>> {
        let sql = format!(
            "{} WHERE {} = $1 AND {} = $2",
            self.select(),
            self.subject,
            self.target
        );
        sqlx::query_as::<_, RelationModel>(&sql)
            .bind(subject)
            .bind(target)
            .fetch_optional(pool)
            .await
            .map_err(map_db_error)
    }

    async fn insert<F>(
        &self,
        pool: &PgPool,
        subject: i64,
        target: i64,
        on_conflict: F,
    ) -> RepoResult<RelationModel>
    where
        F: FnOnce() -> DomainError + Send,
    {
        let sql = format!(
            "INSERT INTO {table} ({s}, {t}) VALUES ($1, $2) \
             RETURNING {s} AS subject_id, {t} AS target_id, created_at, deleted_at",
            table = self.table,
            s = self.subject,
            t = self.target,
        );
        sqlx::query_as::<_, RelationModel>(&sql)
            .bind(subject)
            .bind(target)
            .fetch_one(pool)
            .await
            .map_err(|e| map_unique_violation(e, on_conflict))
    }

    /// `Removed -> Active`; the relation counts as new from now on
    async fn restore(&self, pool: &PgPool, subject: i64, target: i64) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {table} SET deleted_at = NULL, created_at = NOW() \
             WHERE {s} = $1 AND {t} = $2 AND deleted_at IS NOT NULL",
            table = self.table,
            s = self.subject,
            t = self.target,
        );
        let result = sqlx::query(&sql)
            .bind(subject)
            .bind(target)
            .execute(pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    /// `Active -> Removed`
    async fn remove(&self, pool: &PgPool, subject: i64, target: i64) -> RepoResult<bool> {
        let sql = format!(
            "UPDATE {table} SET deleted_at = NOW() \
             WHERE {s} = $1 AND {t} = $2 AND deleted_at IS NULL",
            table = self.table,
            s = self.subject,
            t = self.target,
        );
        let result = sqlx::query(&sql)
            .bind(subject)
            .bind(target)
            .execute(pool)
            .await
            .map_err(map_db_error)?;
        Ok(result.rows_affected() > 0)
    }

    async fn count_active(&self, pool: &PgPool, column: &str, id: i64) -> RepoResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM {table} WHERE {column} = $1 AND deleted_at IS NULL",
            table = self.table,
        );
        sqlx::query_scalar::<_, i64>(&sql)
            .bind(id)
            .fetch_one(pool)
            .await
            .map_err(map_db_error)
    }
}

/// Implements `RelationRepository` for a pool-backed repository over one table
macro_rules! relation_repository {
    ($(#[$meta:meta])* $name:ident, $table:ident, $subject:ty, $target:ty, $conflict:expr, $missing:expr) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            pool: PgPool,
        }

        impl $name {
            pub fn new(pool: PgPool) -> Self {
                Self { pool }
            }
        }

        #[async_trait]
        impl RelationRepository<$subject, $target> for $name {
            #[instrument(skip(self))]
            async fn find(
                &self,
                subject: $subject,
                target: $target,
            ) -> RepoResult<Option<Relation<$subject, $target>>> {
                let result = $table
                    .find(&self.pool, subject.into_inner(), target.into_inner())
                    .await?;
                Ok(result.map(RelationModel::into_relation))
            }

            #[instrument(skip(self))]
            async fn create(
                &self,
                subject: $subject,
                target: $target,
            ) -> RepoResult<Relation<$subject, $target>> {
                let result = $table
                    .insert(&self.pool, subject.into_inner(), target.into_inner(), || $conflict)
                    .await?;
                Ok(result.into_relation())
            }

            #[instrument(skip(self))]
            async fn restore(&self, subject: $subject, target: $target) -> RepoResult<()> {
                let restored = $table
                    .restore(&self.pool, subject.into_inner(), target.into_inner())
                    .await?;
                if restored {
                    Ok(())
                } else {
                    Err($missing)
                }
            }

            #[instrument(skip(self))]
            async fn remove(&self, subject: $subject, target: $target) -> RepoResult<bool> {
                $table
                    .remove(&self.pool, subject.into_inner(), target.into_inner())
                    .await
            }
        }
    };
}

relation_repository!(
    /// PostgreSQL implementation of LikeRepository
    PgLikeRepository, LIKES, UserId, PostId, DomainError::AlreadyLiked, DomainError::LikeNotFound
);

relation_repository!(
    /// PostgreSQL implementation of BookmarkRepository
    PgBookmarkRepository,
    BOOKMARKS,
    UserId,
    PostId,
    DomainError::AlreadyBookmarked,
    DomainError::BookmarkNotFound
);

relation_repository!(
    /// PostgreSQL implementation of FollowRepository
    PgFollowRepository,
    FOLLOWS,
    UserId,
    UserId,
    DomainError::AlreadyFollowingUser,
    DomainError::NotFollowingUser
);

relation_repository!(
    /// PostgreSQL implementation of TopicFollowRepository
    PgTopicFollowRepository,
    TOPIC_FOLLOWS,
    UserId,
    TopicId,
    DomainError::AlreadyFollowingTopic,
    DomainError::NotFollowingTopic
);

#[async_trait]
impl LikeRepository for PgLikeRepository {
    #[instrument(skip(self))]
    async fn count_by_post(&self, post_id: PostId) -> RepoResult<i64> {
        LIKES
            .count_active(&self.pool, LIKES.target, post_id.into_inner())
            .await
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    #[instrument(skip(self))]
    async fn list_by_user(&self, user_id: UserId) -> RepoResult<Vec<Bookmark>> {
        let sql = format!(
            "{} WHERE user_id = $1 AND deleted_at IS NULL ORDER BY created_at DESC",
            BOOKMARKS.select()
        );
        let results = sqlx::query_as::<_, RelationModel>(&sql)
            .bind(user_id.into_inner())
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(RelationModel::into_relation).collect())
    }
}

#[async_trait]
impl FollowRepository for PgFollowRepository {
    #[instrument(skip(self))]
    async fn count_followers(&self, user_id: UserId) -> RepoResult<i64> {
        FOLLOWS
            .count_active(&self.pool, FOLLOWS.target, user_id.into_inner())
            .await
    }

    #[instrument(skip(self))]
    async fn count_following(&self, user_id: UserId) -> RepoResult<i64> {
        FOLLOWS
            .count_active(&self.pool, FOLLOWS.subject, user_id.into_inner())
            .await
    }
}

#[async_trait]
impl TopicFollowRepository for PgTopicFollowRepository {
    #[instrument(skip(self))]
    async fn count_followers(&self, topic_id: TopicId) -> RepoResult<i64> {
        TOPIC_FOLLOWS
            .count_active(&self.pool, TOPIC_FOLLOWS.target, topic_id.into_inner())
            .await
    }
}
