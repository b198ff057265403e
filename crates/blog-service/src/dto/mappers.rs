//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use blog_core::entities::{Comment, Post, Topic, User};

use super::responses::{
    CommentResponse, PostResponse, PublicUserResponse, TopicResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            bio: user.bio.clone(),
            avatar: user.avatar.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

// ============================================================================
// Content Mappers
// ============================================================================

impl PostResponse {
    /// Build a post response with an already loaded author
    pub fn with_author(post: Post, author: Option<&User>) -> Self {
        Self {
            id: post.id,
            title: post.title,
            slug: post.slug,
            content: post.content,
            excerpt: post.excerpt,
            cover_image: post.cover_image,
            tags: post.tags,
            published: post.published,
            view_count: post.view_count,
            read_time: post.read_time,
            author: author.map(PublicUserResponse::from),
            created_at: post.created_at,
            updated_at: post.updated_at,
            published_at: post.published_at,
        }
    }
}

impl CommentResponse {
    /// Build a comment response with an already loaded author and no replies
    pub fn with_user(comment: Comment, user: Option<&User>) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            parent_id: comment.parent_id,
            content: comment.content,
            user: user.map(PublicUserResponse::from),
            created_at: comment.created_at,
            updated_at: comment.updated_at,
            replies: None,
        }
    }
}

impl From<Topic> for TopicResponse {
    fn from(topic: Topic) -> Self {
        Self {
            id: topic.id,
            name: topic.name,
            slug: topic.slug,
            description: topic.description,
            created_at: topic.created_at,
        }
    }
}
