//! User handlers
//!
//! Public profiles and a user's published posts.

use axum::{extract::State, Json};
use blog_service::{PostListResponse, ProfileResponse, UserEnvelope, UserService};

use crate::extractors::SlugPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// GET /users/{username}
pub async fn get_profile(
    State(state): State<AppState>,
    SlugPath(username): SlugPath,
) -> ApiResult<Json<UserEnvelope<ProfileResponse>>> {
    let service = UserService::new(state.service_context());
    let profile = service.profile(&username).await?;
    Ok(Json(UserEnvelope::new(profile)))
}

/// GET /users/{username}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    SlugPath(username): SlugPath,
) -> ApiResult<Json<PostListResponse>> {
    let service = UserService::new(state.service_context());
    let response = service.posts(&username).await?;
    Ok(Json(response))
}
