//! Topic service - topics and topic follows

use blog_core::entities::{NewTopic, Topic};
use blog_core::value_objects::UserId;
use blog_core::DomainError;
use tracing::{info, instrument};

use crate::dto::{
    CreateTopicRequest, FollowStatusResponse, MessageResponse, TopicDetailResponse,
    TopicListResponse, TopicResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::relation::{activate, deactivate, is_active};

/// Topic service
pub struct TopicService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TopicService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// All topics by name
    #[instrument(skip(self))]
    pub async fn list(&self) -> ServiceResult<TopicListResponse> {
        let topics = self.ctx.topic_repo().list().await?;
        Ok(TopicListResponse {
            topics: topics.into_iter().map(TopicResponse::from).collect(),
            total: None,
        })
    }

    #[instrument(skip(self))]
    pub async fn get(&self, slug: &str) -> ServiceResult<TopicDetailResponse> {
        let topic = self.find(slug).await?;
        let follower_count = self.ctx.topic_follow_repo().count_followers(topic.id).await?;
        Ok(TopicDetailResponse {
            topic: topic.into(),
            follower_count,
        })
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create(&self, request: CreateTopicRequest) -> ServiceResult<TopicResponse> {
        let new_topic = NewTopic::new(&request.name, request.description);

        if self
            .ctx
            .topic_repo()
            .name_or_slug_exists(&new_topic.name, &new_topic.slug)
            .await?
        {
            return Err(DomainError::TopicExists.into());
        }

        let topic = self.ctx.topic_repo().create(&new_topic).await?;

        info!(topic_id = %topic.id, slug = %topic.slug, "Topic created");
        Ok(topic.into())
    }

    #[instrument(skip(self))]
    pub async fn follow(&self, user_id: UserId, slug: &str) -> ServiceResult<MessageResponse> {
        let topic = self.find(slug).await?;
        activate(
            self.ctx.topic_follow_repo(),
            user_id,
            topic.id,
            DomainError::AlreadyFollowingTopic,
        )
        .await?;

        info!(user_id = %user_id, topic_id = %topic.id, "Topic followed");
        Ok(MessageResponse::new("Successfully followed topic"))
    }

    #[instrument(skip(self))]
    pub async fn unfollow(&self, user_id: UserId, slug: &str) -> ServiceResult<MessageResponse> {
        let topic = self.find(slug).await?;
        deactivate(
            self.ctx.topic_follow_repo(),
            user_id,
            topic.id,
            DomainError::NotFollowingTopic,
        )
        .await?;

        info!(user_id = %user_id, topic_id = %topic.id, "Topic unfollowed");
        Ok(MessageResponse::new("Successfully unfollowed topic"))
    }

    #[instrument(skip(self))]
    pub async fn status(&self, user_id: UserId, slug: &str) -> ServiceResult<FollowStatusResponse> {
        let topic = self.find(slug).await?;
        Ok(FollowStatusResponse {
            following: is_active(self.ctx.topic_follow_repo(), user_id, topic.id).await?,
        })
    }

    /// Topics the caller follows
    #[instrument(skip(self))]
    pub async fn followed_by(&self, user_id: UserId) -> ServiceResult<TopicListResponse> {
        let topics = self.ctx.topic_repo().find_followed_by(user_id).await?;
        Ok(TopicListResponse {
            total: Some(topics.len() as i64),
            topics: topics.into_iter().map(TopicResponse::from).collect(),
        })
    }

    async fn find(&self, slug: &str) -> ServiceResult<Topic> {
        self.ctx
            .topic_repo()
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| DomainError::TopicNotFound.into())
    }
}
