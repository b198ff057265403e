//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::{json, Value};

/// Register and login a fresh user, returning the login body
async fn login_new_user(server: &TestServer) -> (RegisterRequest, LoginResponse) {
    let register = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &register).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/api/auth/login", &LoginRequest::from_register(&register))
        .await
        .unwrap();
    let login = assert_json(response, StatusCode::OK).await.unwrap();
    (register, login)
}

async fn create_post(server: &TestServer, token: &str, published: bool) -> PostResponse {
    let response = server
        .post_auth("/api/posts", token, &CreatePostRequest::unique(published))
        .await
        .unwrap();
    let envelope: PostEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    envelope.post
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["database"], "up");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, login) = login_new_user(&server).await;
    assert_eq!(login.user.username, register.username);
    assert_eq!(login.token_type, "Bearer");
    assert!(login.expires_in > 0);
    assert_ne!(login.access_token, login.refresh_token);

    let response = server.get_auth("/api/user/me", &login.access_token).await.unwrap();
    let me: UserEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user.id, login.user.id);

    let response = server
        .post("/api/auth/refresh", &json!({"refresh_token": login.refresh_token}))
        .await
        .unwrap();
    let refreshed: RefreshResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_ne!(refreshed.access_token, login.access_token);

    let logout = json!({"access_token": login.access_token, "refresh_token": login.refresh_token});
    let response = server.post("/api/auth/logout", &logout).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Idempotent
    let response = server.post("/api/auth/logout", &logout).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get_auth("/api/user/me", &login.access_token).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/api/auth/refresh", &json!({"refresh_token": login.refresh_token}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_register_duplicate_email_case_insensitive() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let first = RegisterRequest::unique();
    let response = server.post("/api/auth/register", &first).await.unwrap();
    let registered: RegisterResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(registered.user.email.as_deref(), Some(first.email.as_str()));

    let mut second = RegisterRequest::unique();
    second.email = first.email.to_uppercase();
    let response = server.post("/api/auth/register", &second).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (register, _) = login_new_user(&server).await;

    let wrong_password = LoginRequest {
        email: register.email.clone(),
        password: "Wrong1234".to_string(),
    };
    let unknown = LoginRequest {
        email: format!("missing{}@example.com", unique_suffix()),
        password: TEST_PASSWORD.to_string(),
    };

    let a = server.post("/api/auth/login", &wrong_password).await.unwrap();
    let b = server.post("/api/auth/login", &unknown).await.unwrap();
    assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(b.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(a.text().await.unwrap(), b.text().await.unwrap());
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_crud_and_visibility() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = login_new_user(&server).await;
    let (_, reader) = login_new_user(&server).await;

    let draft = create_post(&server, &author.access_token, false).await;
    assert!(!draft.published);
    assert_eq!(draft.read_time, 1);

    // Drafts are hidden from everyone but the author
    let path = format!("/api/posts/{}", draft.slug);
    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.get_auth(&path, &reader.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
    let response = server.get_auth(&path, &author.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // Only the author may edit
    let id_path = format!("/api/posts/{}", draft.id);
    let publish = json!({"published": true});
    let response = server.put_auth(&id_path, &reader.access_token, &publish).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.put_auth(&id_path, &author.access_token, &publish).await.unwrap();
    let updated: PostEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(updated.post.published);

    // Each read bumps the view count
    let response = server.get(&path).await.unwrap();
    let first: PostEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    let response = server.get(&path).await.unwrap();
    let second: PostEnvelope = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(second.post.view_count, first.post.view_count + 1);

    let response = server.get_auth("/api/posts/my", &author.access_token).await.unwrap();
    let mine: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(mine["posts"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == draft.id));

    let response = server.delete_auth(&id_path, &author.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_listing_pagination() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, author) = login_new_user(&server).await;
    create_post(&server, &author.access_token, true).await;
    create_post(&server, &author.access_token, true).await;

    let response = server.get("/api/posts?page=1&limit=1&sort=views").await.unwrap();
    let page: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page["page"], 1);
    assert_eq!(page["limit"], 1);
    assert_eq!(page["posts"].as_array().unwrap().len(), 1);
    assert!(page["total"].as_i64().unwrap() >= 2);

    let response = server.get("/api/posts?limit=abc&page=-3").await.unwrap();
    let fallback: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fallback["page"], 1);
    assert_eq!(fallback["limit"], 10);
}

// ============================================================================
// Relation Tests
// ============================================================================

#[tokio::test]
async fn test_like_state_machine() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = login_new_user(&server).await;
    let post = create_post(&server, &user.access_token, true).await;
    let path = format!("/api/posts/{}/like", post.id);

    let response = server.post_auth(&path, &user.access_token, &json!({})).await.unwrap();
    let liked: LikeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(liked.like_count, 1);

    let response = server.post_auth(&path, &user.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server.delete_auth(&path, &user.access_token).await.unwrap();
    let unliked: LikeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unliked.like_count, 0);

    let response = server.delete_auth(&path, &user.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Removed -> Active
    let response = server.post_auth(&path, &user.access_token, &json!({})).await.unwrap();
    let restored: LikeResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(restored.like_count, 1);

    let response = server.get(&format!("/api/posts/{}/likes", post.id)).await.unwrap();
    let count: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count["like_count"], 1);
}

#[tokio::test]
async fn test_bookmarks() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = login_new_user(&server).await;
    let post = create_post(&server, &user.access_token, true).await;
    let path = format!("/api/posts/{}/bookmark", post.id);

    let response = server.post_auth(&path, &user.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.get_auth(&path, &user.access_token).await.unwrap();
    let status: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(status["bookmarked"], true);

    let response = server.get_auth("/api/bookmarks", &user.access_token).await.unwrap();
    let list: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(list["total"], 1);
    assert_eq!(list["bookmarks"][0]["id"], post.id);
}

#[tokio::test]
async fn test_follow_and_feed() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (author_reg, author) = login_new_user(&server).await;
    let (_, reader) = login_new_user(&server).await;
    let post = create_post(&server, &author.access_token, true).await;

    let self_follow = format!("/api/users/{}/follow", reader.user.username);
    let response = server
        .post_auth(&self_follow, &reader.access_token, &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let follow = format!("/api/users/{}/follow", author_reg.username);
    let response = server.post_auth(&follow, &reader.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/users/{}", author_reg.username))
        .await
        .unwrap();
    let profile: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile["user"]["follower_count"], 1);

    let response = server.get_auth("/api/feed", &reader.access_token).await.unwrap();
    let feed: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(feed["posts"]
        .as_array()
        .unwrap()
        .iter()
        .any(|p| p["id"] == post.id));

    let response = server.delete_auth(&follow, &reader.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server.delete_auth(&follow, &reader.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = login_new_user(&server).await;
    let post = create_post(&server, &user.access_token, true).await;
    let path = format!("/api/posts/{}/comments", post.id);

    let response = server
        .post_auth(&path, &user.access_token, &json!({"content": "First!"}))
        .await
        .unwrap();
    let parent: Value = assert_json(response, StatusCode::CREATED).await.unwrap();
    let parent_id = parent["comment"]["id"].clone();

    let response = server
        .post_auth(
            &path,
            &user.access_token,
            &json!({"content": "A reply", "parent_id": parent_id}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &path,
            &user.access_token,
            &json!({"content": "Orphan", "parent_id": 999_999_999}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let thread: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread["total"], 2);
    assert_eq!(thread["comments"][0]["replies"][0]["content"], "A reply");

    let response = server
        .delete_auth(&format!("/api/comments/{parent_id}"), &user.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    let thread: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(thread["total"], 0);
}

// ============================================================================
// Topic Tests
// ============================================================================

#[tokio::test]
async fn test_topics() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, user) = login_new_user(&server).await;

    let request = CreateTopicRequest::unique();
    let response = server.post_auth("/api/topics", &user.access_token, &request).await.unwrap();
    let created: TopicEnvelope = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(created.topic.slug, request.name.to_lowercase().replace(' ', "-"));

    let response = server.post_auth("/api/topics", &user.access_token, &request).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let follow = format!("/api/topics/{}/follow", created.topic.slug);
    let response = server.post_auth(&follow, &user.access_token, &json!({})).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/topics/{}", created.topic.slug))
        .await
        .unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["follower_count"], 1);

    let response = server.get_auth("/api/user/topics", &user.access_token).await.unwrap();
    let mine: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mine["total"], 1);
}
