//! Authentication handlers
//!
//! Endpoints for registration, login, token refresh, logout and the current user.

use axum::{extract::State, Json};
use blog_service::{
    AuthService, LoginRequest, LoginResponse, LogoutRequest, MessageResponse, RefreshResponse,
    RefreshTokenRequest, RegisterRequest, RegisterResponse, UserEnvelope, UserResponse,
};

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user; no tokens are issued
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(RegisterResponse::new(UserResponse::from(user)))))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// Mint a new access token from a stored refresh token
///
/// POST /auth/refresh
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RefreshTokenRequest>,
) -> ApiResult<Json<RefreshResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.refresh(request).await?;
    Ok(Json(response))
}

/// Revoke the access token and drop the refresh token
///
/// POST /auth/logout
pub async fn logout(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LogoutRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    service.logout(request).await?;
    Ok(Json(MessageResponse::new("Logged out successfully")))
}

/// Get the authenticated user
///
/// GET /user/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UserEnvelope<UserResponse>>> {
    let service = AuthService::new(state.service_context());
    let user = service.me(auth.user_id).await?;
    Ok(Json(UserEnvelope::new(UserResponse::from(user))))
}
