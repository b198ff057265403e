//! Post handlers
//!
//! Listing, reading, authoring and the personal feed.

use axum::{extract::State, Json};
use blog_core::PostId;
use blog_service::{
    CreatePostRequest, MessageResponse, PostEnvelope, PostListResponse, PostService,
    UpdatePostRequest,
};

use crate::extractors::{AuthUser, IdPath, OptionalAuthUser, Pagination, SlugPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Published posts, paginated
///
/// GET /posts
pub async fn list_posts(
    State(state): State<AppState>,
    Pagination(query): Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.list(query).await?;
    Ok(Json(response))
}

/// Read a post by slug; drafts are visible to their author only
///
/// GET /posts/{slug}
pub async fn get_post(
    State(state): State<AppState>,
    viewer: OptionalAuthUser,
    SlugPath(slug): SlugPath,
) -> ApiResult<Json<PostEnvelope>> {
    let service = PostService::new(state.service_context());
    let post = service.get_by_slug(&slug, viewer.user_id()).await?;
    Ok(Json(PostEnvelope { post }))
}

/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostEnvelope>>> {
    let service = PostService::new(state.service_context());
    let post = service.create(auth.user_id, request).await?;
    Ok(Created(Json(PostEnvelope { post })))
}

/// PUT /posts/{id}
pub async fn update_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> ApiResult<Json<PostEnvelope>> {
    let service = PostService::new(state.service_context());
    let post = service.update(auth.user_id, post_id, request).await?;
    Ok(Json(PostEnvelope { post }))
}

/// DELETE /posts/{id}
pub async fn delete_post(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(post_id): IdPath<PostId>,
) -> ApiResult<Json<MessageResponse>> {
    let service = PostService::new(state.service_context());
    service.delete(auth.user_id, post_id).await?;
    Ok(Json(MessageResponse::new("Post deleted successfully")))
}

/// All of the caller's posts, drafts included
///
/// GET /posts/my
pub async fn my_posts(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<PostListResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.my_posts(auth.user_id).await?;
    Ok(Json(response))
}

/// Posts from followed authors
///
/// GET /feed
pub async fn feed(
    State(state): State<AppState>,
    auth: AuthUser,
    Pagination(query): Pagination,
) -> ApiResult<Json<PostListResponse>> {
    let service = PostService::new(state.service_context());
    let response = service.feed(auth.user_id, query).await?;
    Ok(Json(response))
}
