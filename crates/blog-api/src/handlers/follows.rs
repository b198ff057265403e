//! User follow handlers

use axum::{extract::State, Json};
use blog_service::{FollowService, FollowStatusResponse, MessageResponse};

use crate::extractors::{AuthUser, SlugPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /users/{username}/follow
pub async fn follow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(username): SlugPath,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = FollowService::new(state.service_context());
    let response = service.follow(auth.user_id, &username).await?;
    Ok(Created(Json(response)))
}

/// DELETE /users/{username}/follow
pub async fn unfollow_user(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(username): SlugPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.unfollow(auth.user_id, &username).await?;
    Ok(Json(response))
}

/// GET /users/{username}/follow
pub async fn follow_status(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(username): SlugPath,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = FollowService::new(state.service_context());
    let response = service.status(auth.user_id, &username).await?;
    Ok(Json(response))
}
