//! Bookmark handlers

use axum::{extract::State, Json};
use blog_core::PostId;
use blog_service::{BookmarkListResponse, BookmarkService, BookmarkStatusResponse, MessageResponse};

use crate::extractors::{AuthUser, IdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// POST /posts/{id}/bookmark
pub async fn add_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = BookmarkService::new(state.service_context());
    let response = service.add(auth.user_id, post_id).await?;
    Ok(Created(Json(response)))
}

/// DELETE /posts/{id}/bookmark
pub async fn remove_bookmark(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = BookmarkService::new(state.service_context());
    let response = service.remove(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// GET /posts/{id}/bookmark
pub async fn bookmark_status(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<BookmarkStatusResponse>> {
    let service = BookmarkService::new(state.service_context());
    let response = service.status(auth.user_id, post_id).await?;
    Ok(Json(response))
}

/// GET /bookmarks
pub async fn list_bookmarks(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<BookmarkListResponse>> {
    let service = BookmarkService::new(state.service_context());
    let response = service.list(auth.user_id).await?;
    Ok(Json(response))
}
