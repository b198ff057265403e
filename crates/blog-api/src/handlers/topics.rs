//! Topic handlers

use axum::{extract::State, Json};
use blog_service::{
    CreateTopicRequest, FollowStatusResponse, MessageResponse, TopicDetailResponse,
    TopicEnvelope, TopicListResponse, TopicService,
};

use crate::extractors::{AuthUser, SlugPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /topics
pub async fn list_topics(State(state): State<AppState>) -> ApiResult<Json<TopicListResponse>> {
    let service = TopicService::new(state.service_context());
    let response = service.list().await?;
    Ok(Json(response))
}

/// GET /topics/{slug}
pub async fn get_topic(
    State(state): State<AppState>,
    SlugPath(slug): SlugPath,
) -> ApiResult<Json<TopicDetailResponse>> {
    let service = TopicService::new(state.service_context());
    let response = service.get(&slug).await?;
    Ok(Json(response))
}

/// POST /topics
pub async fn create_topic(
    State(state): State<AppState>,
    _auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateTopicRequest>,
) -> ApiResult<Created<Json<TopicEnvelope>>> {
    let service = TopicService::new(state.service_context());
    let topic = service.create(request).await?;
    Ok(Created(Json(TopicEnvelope { topic })))
}

/// POST /topics/{slug}/follow
pub async fn follow_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(slug): SlugPath,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = TopicService::new(state.service_context());
    let response = service.follow(auth.user_id, &slug).await?;
    Ok(Created(Json(response)))
}

/// DELETE /topics/{slug}/follow
pub async fn unfollow_topic(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(slug): SlugPath,
) -> ApiResult<Json<MessageResponse>> {
    let service = TopicService::new(state.service_context());
    let response = service.unfollow(auth.user_id, &slug).await?;
    Ok(Json(response))
}

/// GET /topics/{slug}/follow
pub async fn topic_follow_status(
    State(state): State<AppState>,
    auth: AuthUser,
    SlugPath(slug): SlugPath,
) -> ApiResult<Json<FollowStatusResponse>> {
    let service = TopicService::new(state.service_context());
    let response = service.status(auth.user_id, &slug).await?;
    Ok(Json(response))
}

/// Topics the caller follows
///
/// GET /user/topics
pub async fn my_topics(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<TopicListResponse>> {
    let service = TopicService::new(state.service_context());
    let response = service.followed_by(auth.user_id).await?;
    Ok(Json(response))
}
