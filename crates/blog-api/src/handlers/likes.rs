//! Like handlers

use axum::{extract::State, Json};
use blog_core::PostId;
use blog_service::{LikeCountResponse, LikeResponse, LikeService, LikeStatusResponse};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /posts/{id}/like
pub async fn like_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Created<Json<LikeResponse>>> {
    let service = LikeService::new(state.service_context());
    let response = service.like(auth.user_id, post_id).await?;
    Ok(Created(Json(response)))
}

/// DELETE /posts/{id}/like
pub async fn unlike_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<LikeResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service.unlike(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// GET /posts/{id}/like
pub async fn like_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<LikeStatusResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service.status(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// GET /posts/{id}/likes
pub async fn like_count(
    State(state): State<AppState>,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<LikeCountResponse>> {
    let service = LikeService::new(state.service_context());
    let response = service.like_count(post_id).await?;
    Ok(Json(response))
}
