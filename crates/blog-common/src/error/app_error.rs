//! Application error types
//!
//! Auth gate failures, credential checks and infrastructure faults. Domain
//! rule violations are wrapped as-is.

use std::fmt;

use blog_core::DomainError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Bad signature, malformed, or wrong token kind
    #[error("Invalid or expired token")]
    InvalidToken,

    /// Same message and code as `InvalidToken`; only the logs tell them apart
    #[error("Invalid or expired token")]
    TokenExpired,

    #[error("Token has been revoked")]
    TokenRevoked,

    #[error("Authorization header required")]
    MissingAuth,

    #[error("Authorization header format must be Bearer {{token}}")]
    InvalidAuthScheme,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    /// Signature checks out but the token is not (or no longer) stored
    #[error("Refresh token not found or expired")]
    RefreshTokenNotFound,

    #[error("Invalid access token")]
    InvalidAccessToken,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error")]
    Internal(#[source] anyhow::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::TokenExpired
            | Self::TokenRevoked
            | Self::MissingAuth
            | Self::InvalidAuthScheme
            | Self::InvalidRefreshToken
            | Self::RefreshTokenNotFound
            | Self::InvalidAccessToken => 401,
            Self::Database(_) | Self::Internal(_) | Self::Config(_) => 500,
            Self::Domain(e) => domain_status(e),
        }
    }

    /// Machine-readable error code
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken | Self::TokenExpired => "INVALID_TOKEN",
            Self::TokenRevoked => "TOKEN_REVOKED",
            Self::MissingAuth => "MISSING_AUTH",
            Self::InvalidAuthScheme => "INVALID_AUTH_SCHEME",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::RefreshTokenNotFound => "REFRESH_TOKEN_NOT_FOUND",
            Self::InvalidAccessToken => "INVALID_ACCESS_TOKEN",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
            Self::Domain(e) => e.code(),
        }
    }

    /// Whether the failure happened on our side
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Wrap an unexpected failure; the message is logged, never returned
    pub fn internal(context: impl fmt::Display) -> Self {
        Self::Internal(anyhow::anyhow!(context.to_string()))
    }
}

fn domain_status(err: &DomainError) -> u16 {
    if err.is_not_found() {
        404
    } else if err.is_authorization() {
        403
    } else if err.is_validation() {
        400
    } else if err.is_conflict() {
        409
    } else {
        500
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
