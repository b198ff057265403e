//! PostgreSQL implementations of the refresh-token and revocation stores

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use blog_core::entities::{RefreshToken, RevokedToken};
use blog_core::error::DomainError;
use blog_core::traits::{RefreshTokenRepository, RepoResult, RevokedTokenRepository};
use blog_core::value_objects::UserId;

use crate::models::{RefreshTokenModel, RevokedTokenModel};

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of RefreshTokenRepository
#[derive(Clone)]
pub struct PgRefreshTokenRepository {
    pool: PgPool,
}

impl PgRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PgRefreshTokenRepository {
    #[instrument(skip(self, token))]
    async fn create(
        &self,
        user_id: UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> RepoResult<RefreshToken> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            INSERT INTO refresh_tokens (user_id, token, expires_at)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, token, expires_at, created_at
            ",
        )
        .bind(user_id.into_inner())
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::RefreshTokenExists))?;

        Ok(RefreshToken::from(result))
    }

    #[instrument(skip(self, token))]
    async fn find_valid(
        &self,
        token: &str,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepoResult<Option<RefreshToken>> {
        let result = sqlx::query_as::<_, RefreshTokenModel>(
            r"
            SELECT id, user_id, token, expires_at, created_at
            FROM refresh_tokens
            WHERE token = $1 AND user_id = $2 AND expires_at > $3
            ",
        )
        .bind(token)
        .bind(user_id.into_inner())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(RefreshToken::from))
    }

    #[instrument(skip(self, token))]
    async fn delete(&self, token: &str) -> RepoResult<()> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_by_user(&self, user_id: UserId) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}

/// PostgreSQL implementation of RevokedTokenRepository
#[derive(Clone)]
pub struct PgRevokedTokenRepository {
    pool: PgPool,
}

impl PgRevokedTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RevokedTokenRepository for PgRevokedTokenRepository {
    #[instrument(skip(self, token))]
    async fn revoke(&self, token: &str, expires_at: DateTime<Utc>) -> RepoResult<RevokedToken> {
        let result = sqlx::query_as::<_, RevokedTokenModel>(
            r"
            INSERT INTO revoked_tokens (token, expires_at)
            VALUES ($1, $2)
            RETURNING token, expires_at, created_at
            ",
        )
        .bind(token)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::TokenAlreadyRevoked))?;

        Ok(RevokedToken::from(result))
    }

    #[instrument(skip(self, token))]
    async fn is_revoked(&self, token: &str) -> RepoResult<bool> {
        let result = sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(SELECT 1 FROM revoked_tokens WHERE token = $1)
            ",
        )
        .bind(token)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn purge_expired(&self, now: DateTime<Utc>) -> RepoResult<u64> {
        let result = sqlx::query("DELETE FROM revoked_tokens WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }
}
