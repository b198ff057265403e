//! Post, comment and topic model -> entity mappers

use blog_core::entities::{Comment, Post, Topic};
use blog_core::value_objects::{CommentId, PostId, RecordState, TopicId, UserId};

use crate::models::{CommentModel, PostModel, TopicModel};

impl From<PostModel> for Post {
    fn from(model: PostModel) -> Self {
        Post {
            id: PostId::new(model.id),
            author_id: UserId::new(model.author_id),
            title: model.title,
            slug: model.slug,
            content: model.content,
            excerpt: model.excerpt,
            cover_image: model.cover_image,
            tags: model.tags,
            published: model.published,
            view_count: model.view_count,
            read_time: model.read_time,
            created_at: model.created_at,
            updated_at: model.updated_at,
            published_at: model.published_at,
            state: RecordState::from_deleted_at(model.deleted_at),
        }
    }
}

impl From<CommentModel> for Comment {
    fn from(model: CommentModel) -> Self {
        Comment {
            id: CommentId::new(model.id),
            post_id: PostId::new(model.post_id),
            user_id: UserId::new(model.user_id),
            parent_id: model.parent_id.map(CommentId::new),
            content: model.content,
            created_at: model.created_at,
            updated_at: model.updated_at,
            state: RecordState::from_deleted_at(model.deleted_at),
        }
    }
}

impl From<TopicModel> for Topic {
    fn from(model: TopicModel) -> Self {
        Topic {
            id: TopicId::new(model.id),
            name: model.name,
            slug: model.slug,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
