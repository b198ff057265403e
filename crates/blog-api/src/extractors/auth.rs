//! Authentication extractor
//!
//! Pulls the bearer token from the Authorization header, validates it and
//! checks the revocation list before any handler runs.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use blog_common::{AccessClaims, AppError};
use blog_core::UserId;
use blog_service::AuthService;

use crate::response::ApiError;
use crate::state::AppState;

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticated user extracted from an access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
}

impl From<AccessClaims> for AuthUser {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            username: claims.username,
        }
    }
}

/// Extract the token from `Authorization: Bearer <token>`
///
/// # Errors
/// `MissingAuth` when the header is absent or empty, `InvalidAuthScheme`
/// when it is not exactly `Bearer ` followed by a non-empty token.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(AppError::MissingAuth)?;
    if value.is_empty() {
        return Err(AppError::MissingAuth);
    }

    let value = value.to_str().map_err(|_| AppError::InvalidAuthScheme)?;
    match value.strip_prefix(BEARER_PREFIX) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::InvalidAuthScheme),
    }
}

async fn authenticate(parts: &Parts, state: &AppState) -> Result<AuthUser, ApiError> {
    let token = bearer_token(&parts.headers).inspect_err(|e| {
        tracing::warn!(error = %e, "Rejected authorization header");
    })?;

    let claims = AuthService::new(state.service_context())
        .authenticate(token)
        .await?;

    Ok(AuthUser::from(claims))
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        authenticate(parts, &app_state).await
    }
}

/// Optional authenticated user
///
/// Runs the same checks as [`AuthUser`] but resolves to `None` on any failure.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl OptionalAuthUser {
    pub fn user_id(&self) -> Option<UserId> {
        self.0.as_ref().map(|user| user.user_id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if !parts.headers.contains_key(header::AUTHORIZATION) {
            return Ok(OptionalAuthUser(None));
        }

        let app_state = AppState::from_ref(state);
        Ok(OptionalAuthUser(authenticate(parts, &app_state).await.ok()))
    }
}
