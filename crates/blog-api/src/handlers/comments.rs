//! Comment handlers

use axum::{extract::State, Json};
use blog_core::{CommentId, PostId};
use blog_service::{
    CommentEnvelope, CommentListResponse, CommentService, CreateCommentRequest, MessageResponse,
    UpdateCommentRequest,
};

use crate::extractors::{AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Threaded comments of a post
///
/// GET /posts/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<CommentListResponse>> {
    let service = CommentService::new(state.service_context());
    let response = service.list(post_id).await?;
    Ok(Json(response))
}

/// POST /posts/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentEnvelope>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create(auth.user_id, post_id, request).await?;
    Ok(Created(Json(CommentEnvelope { comment })))
}

/// PUT /comments/{id}
pub async fn update_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentEnvelope>> {
    let service = CommentService::new(state.service_context());
    let comment = service.update(auth.user_id, comment_id, request).await?;
    Ok(Json(CommentEnvelope { comment }))
}

/// DELETE /comments/{id}
pub async fn delete_comment(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(comment_id): IdPath<CommentId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = CommentService::new(state.service_context());
    service.delete(auth.user_id, comment_id).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
