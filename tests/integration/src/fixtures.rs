//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique per process run, so reruns against one database do not collide
pub fn unique_suffix() -> String {
    let n = COUNTER.fetch_add(1, Ordering::SeqCst);
    format!("{}{n}", std::process::id())
}

/// Password that satisfies the strength policy
pub const TEST_PASSWORD: &str = "Secret123";

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("user{suffix}@example.com"),
            password: TEST_PASSWORD.to_string(),
            username: format!("user_{suffix}"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UserEnvelope {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl CreatePostRequest {
    pub fn unique(published: bool) -> Self {
        let suffix = unique_suffix();
        Self {
            title: format!("Test Post {suffix}"),
            content: "<p>Some words about testing a blog.</p>".to_string(),
            published,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub published: bool,
    pub view_count: i64,
    pub read_time: i32,
}

#[derive(Debug, Deserialize)]
pub struct PostEnvelope {
    pub post: PostResponse,
}

#[derive(Debug, Deserialize)]
pub struct LikeResponse {
    pub message: String,
    pub like_count: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateTopicRequest {
    pub name: String,
}

impl CreateTopicRequest {
    pub fn unique() -> Self {
        Self {
            name: format!("Topic {}", unique_suffix()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TopicResponse {
    pub id: i64,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Deserialize)]
pub struct TopicEnvelope {
    pub topic: TopicResponse,
}
