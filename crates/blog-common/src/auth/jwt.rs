//! JWT utilities for authentication
//!
//! Access tokens carry the caller's identity so the auth gate needs no
//! database round-trip beyond the revocation check. Refresh tokens carry
//! only the subject; they are always checked against the refresh-token store.
//! Both are HS256 with the same secret. The two claim shapes are disjoint,
//! so one kind never decodes as the other.

use blog_core::UserId;
use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::JwtConfig;
use crate::error::AppError;

/// Claims of an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessClaims {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Unique token id
    pub jti: String,
}

impl AccessClaims {
    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

/// Claims of a refresh token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
    pub nbf: i64,
    pub jti: String,
}

impl RefreshClaims {
    /// Get the user ID from the subject
    ///
    /// # Errors
    /// Returns an error if the subject is not a numeric id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        UserId::parse(&self.sub).map_err(|_| AppError::InvalidToken)
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        timestamp_to_datetime(self.exp)
    }
}

/// A signed token and the instant it stops being valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT service for encoding and decoding tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl JwtService {
    /// Create a new JWT service with the given secret and lifetimes
    #[must_use]
    pub fn new(secret: &str, access_token_ttl: Duration, refresh_token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    #[must_use]
    pub fn from_config(config: &JwtConfig) -> Self {
        Self::new(&config.secret, config.access_token_ttl(), config.refresh_token_ttl())
    }

    /// Access token lifetime in seconds
    #[must_use]
    pub fn access_token_ttl_secs(&self) -> i64 {
        self.access_token_ttl.num_seconds()
    }

    /// Issue an access token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_access_token(
        &self,
        user_id: UserId,
        email: &str,
        username: &str,
    ) -> Result<IssuedToken, AppError> {
        self.issue_access_token_at(user_id, email, username, Utc::now())
    }

    /// Issue an access token as if the current time were `now`
    pub fn issue_access_token_at(
        &self,
        user_id: UserId,
        email: &str,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = expiry(now, self.access_token_ttl)?;
        let claims = AccessClaims {
            user_id,
            email: email.to_string(),
            username: username.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            expires_at: timestamp_to_datetime(claims.exp),
        })
    }

    /// Issue a refresh token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_refresh_token(&self, user_id: UserId) -> Result<IssuedToken, AppError> {
        self.issue_refresh_token_at(user_id, Utc::now())
    }

    pub fn issue_refresh_token_at(
        &self,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        let expires_at = expiry(now, self.refresh_token_ttl)?;
        let claims = RefreshClaims {
            sub: user_id.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
            nbf: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        Ok(IssuedToken {
            token: self.encode_claims(&claims)?,
            expires_at: timestamp_to_datetime(claims.exp),
        })
    }

    /// Validate an access token and return the claims
    ///
    /// # Errors
    /// `TokenExpired` past `exp`, `InvalidToken` for anything else
    /// (bad signature, wrong algorithm, malformed, not an access token)
    pub fn validate_access_token(&self, token: &str) -> Result<AccessClaims, AppError> {
        self.decode_claims(token)
    }

    /// Validate a refresh token and return the claims
    ///
    /// # Errors
    /// Same error mapping as [`Self::validate_access_token`]
    pub fn validate_refresh_token(&self, token: &str) -> Result<RefreshClaims, AppError> {
        let claims: RefreshClaims = self.decode_claims(token)?;
        claims.user_id()?;
        Ok(claims)
    }

    fn encode_claims<T: Serialize>(&self, claims: &T) -> Result<String, AppError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    fn decode_claims<T: DeserializeOwned>(&self, token: &str) -> Result<T, AppError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            })
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> Result<DateTime<Utc>, AppError> {
    now.checked_add_signed(ttl)
        .ok_or_else(|| AppError::internal(format!("Token expiry out of range: {ttl}")))
}

fn timestamp_to_datetime(ts: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(ts, 0).single().unwrap_or(DateTime::<Utc>::MAX_UTC)
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .finish_non_exhaustive()
    }
}
