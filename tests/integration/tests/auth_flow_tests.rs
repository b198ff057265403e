//! Session lifecycle tests against the real router with in-memory stores
//!
//! No external services are needed.
//!
//! Run with: cargo test -p integration-tests --test auth_flow_tests

use std::time::Duration;

use axum::http::{Method, StatusCode};
use blog_api::spawn_token_purge;
use blog_common::AppError;
use blog_core::{UserId, UserRepository};
use chrono::Utc;
use integration_tests::TestApp;
use serde_json::json;

const PASSWORD: &str = "Secret123";

fn app() -> TestApp {
    TestApp::new().expect("Failed to build test app")
}

// ============================================================================
// Register / Login
// ============================================================================

#[tokio::test]
async fn test_register_then_login_yields_matching_claims() {
    let app = app();

    let registered = app.register("a@b.com", PASSWORD, "alice").await.unwrap();
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(
        registered.body["message"],
        "Registration successful. Please login to continue."
    );
    assert_eq!(registered.body["user"]["username"], "alice");
    assert!(registered.body.get("access_token").is_none());
    assert!(registered.body["user"].get("password_hash").is_none());

    let login = app.login("a@b.com", PASSWORD).await.unwrap();
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["token_type"], "Bearer");
    assert_eq!(login.body["expires_in"], 15 * 60);

    let access = login.body["access_token"].as_str().unwrap();
    let refresh = login.body["refresh_token"].as_str().unwrap();
    assert!(!access.is_empty());
    assert!(!refresh.is_empty());
    assert_ne!(access, refresh);

    let claims = app.jwt.validate_access_token(access).unwrap();
    let user_id = login.body["user"]["id"].as_i64().unwrap();
    assert_eq!(claims.user_id, UserId::new(user_id));
    assert_eq!(claims.email, "a@b.com");
    assert_eq!(claims.username, "alice");
    assert_eq!(app.refresh_tokens.len(), 1);
}

#[tokio::test]
async fn test_register_normalizes_email() {
    let app = app();

    let registered = app.register("  Mixed@Case.COM ", PASSWORD, "mixed").await.unwrap();
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.body["user"]["email"], "mixed@case.com");

    let login = app.login("MIXED@case.com", PASSWORD).await.unwrap();
    assert_eq!(login.status, StatusCode::OK);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = app();
    app.register("a@b.com", PASSWORD, "alice").await.unwrap();

    let wrong_password = app.login("a@b.com", "Wrong1234").await.unwrap();
    let unknown_email = app.login("nobody@b.com", PASSWORD).await.unwrap();

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.raw, unknown_email.raw);
    assert_eq!(wrong_password.error_message(), "Invalid email or password");
    assert!(app.refresh_tokens.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_in_different_case_conflicts() {
    let app = app();

    let first = app.register("Foo@Bar.com", PASSWORD, "foo").await.unwrap();
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app.register("foo@bar.com", PASSWORD, "foo2").await.unwrap();
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.error_message(), "Email or username already exists");
}

#[tokio::test]
async fn test_duplicate_username_conflicts() {
    let app = app();
    app.register("one@b.com", PASSWORD, "alice").await.unwrap();

    let second = app.register("two@b.com", PASSWORD, "alice").await.unwrap();
    assert_eq!(second.status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_rejects_invalid_input() {
    let app = app();

    let weak = app.register("a@b.com", "short", "alice").await.unwrap();
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);

    let no_digit = app.register("a@b.com", "NoDigitsHere", "alice").await.unwrap();
    assert_eq!(no_digit.status, StatusCode::BAD_REQUEST);

    let bad_username = app.register("a@b.com", PASSWORD, "al ice!").await.unwrap();
    assert_eq!(bad_username.status, StatusCode::BAD_REQUEST);

    let bad_email = app.register("not-an-email", PASSWORD, "alice").await.unwrap();
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.error_code(), "VALIDATION_ERROR");
    assert!(bad_email.body["error"]["details"].is_object());

    let malformed = app
        .post("/api/auth/register", &json!({"email": "a@b.com"}))
        .await
        .unwrap();
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);

    // Nothing was stored, so a valid registration still succeeds
    let ok = app.register("a@b.com", PASSWORD, "alice").await.unwrap();
    assert_eq!(ok.status, StatusCode::CREATED);
}

// ============================================================================
// Auth gate
// ============================================================================

#[tokio::test]
async fn test_gate_requires_header() {
    let app = app();

    let response = app.get("/api/user/me").await.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Authorization header required");
}

#[tokio::test]
async fn test_gate_requires_exact_bearer_scheme() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let lowercase = format!("bearer {}", session.access_token);
    let raw = session.access_token.clone();
    for header in [lowercase.as_str(), raw.as_str(), "Bearer ", "Basic abc"] {
        let response = app
            .request(Method::GET, "/api/user/me", None, Some(header))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(
            response.error_message(),
            "Authorization header format must be Bearer {token}"
        );
    }
}

#[tokio::test]
async fn test_gate_rejects_garbage_and_foreign_tokens() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let garbage = app.get_auth("/api/user/me", "not.a.jwt").await.unwrap();
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_message(), "Invalid or expired token");

    // A refresh token is not an access token even though both share a secret
    let refresh_as_access = app
        .get_auth("/api/user/me", &session.refresh_token)
        .await
        .unwrap();
    assert_eq!(refresh_as_access.status, StatusCode::UNAUTHORIZED);

    let foreign = blog_common::JwtService::new(
        "some-other-secret",
        chrono::Duration::minutes(15),
        chrono::Duration::days(7),
    )
    .issue_access_token(UserId::new(1), "a@b.com", "alice")
    .unwrap();
    let forged = app.get_auth("/api/user/me", &foreign.token).await.unwrap();
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_access_token_expires_after_ttl() {
    let app = app();

    let fresh = app
        .jwt
        .issue_access_token(UserId::new(1), "a@b.com", "alice")
        .unwrap();
    assert!(app.jwt.validate_access_token(&fresh.token).is_ok());

    // Issued 16 minutes ago with a 15 minute lifetime
    let issued_at = Utc::now() - chrono::Duration::minutes(16);
    let stale = app
        .jwt
        .issue_access_token_at(UserId::new(1), "a@b.com", "alice", issued_at)
        .unwrap();
    assert!(matches!(
        app.jwt.validate_access_token(&stale.token),
        Err(AppError::TokenExpired)
    ));

    let response = app.get_auth("/api/user/me", &stale.token).await.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid or expired token");

    // Indistinguishable from a forged token
    let forged = app.get_auth("/api/user/me", "not.a.jwt").await.unwrap();
    assert_eq!(response.raw, forged.raw);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let me = app.get_auth("/api/user/me", &session.access_token).await.unwrap();
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["username"], "alice");
    assert_eq!(me.body["user"]["email"], "a@b.com");
}

#[tokio::test]
async fn test_me_is_not_found_after_account_removal() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();
    let user_id = UserId::new(session.body["user"]["id"].as_i64().unwrap());

    app.users.soft_delete(user_id).await.unwrap();

    let me = app.get_auth("/api/user/me", &session.access_token).await.unwrap();
    assert_eq!(me.status, StatusCode::NOT_FOUND);

    // Soft delete also dropped the refresh token
    assert!(app.refresh_tokens.is_empty());
    let refreshed = app.refresh(&session.refresh_token).await.unwrap();
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_issues_new_access_token_without_rotation() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let first = app.refresh(&session.refresh_token).await.unwrap();
    assert_eq!(first.status, StatusCode::OK);
    let new_access = first.body["access_token"].as_str().unwrap();
    assert_ne!(new_access, session.access_token);
    assert!(first.body.get("refresh_token").is_none());

    let me = app.get_auth("/api/user/me", new_access).await.unwrap();
    assert_eq!(me.status, StatusCode::OK);

    // The same refresh token keeps working
    let second = app.refresh(&session.refresh_token).await.unwrap();
    assert_eq!(second.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_requires_stored_token() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();
    let user_id = UserId::new(session.body["user"]["id"].as_i64().unwrap());

    // Correctly signed but never persisted
    let unstored = app.jwt.issue_refresh_token(user_id).unwrap();
    let response = app.refresh(&unstored.token).await.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "REFRESH_TOKEN_NOT_FOUND");
}

#[tokio::test]
async fn test_refresh_rejects_stored_but_lapsed_row() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();
    let user_id = UserId::new(session.body["user"]["id"].as_i64().unwrap());

    let token = app.jwt.issue_refresh_token(user_id).unwrap();
    app.refresh_tokens
        .insert_raw(user_id, &token.token, Utc::now() - chrono::Duration::seconds(1));

    let response = app.refresh(&token.token).await.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Refresh token not found or expired");
}

#[tokio::test]
async fn test_refresh_rejects_invalid_and_access_tokens() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let garbage = app.refresh("garbage").await.unwrap();
    assert_eq!(garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(garbage.error_message(), "Invalid or expired refresh token");

    let access_as_refresh = app.refresh(&session.access_token).await.unwrap();
    assert_eq!(access_as_refresh.status, StatusCode::UNAUTHORIZED);
    assert_eq!(access_as_refresh.error_code(), "INVALID_REFRESH_TOKEN");
}

// ============================================================================
// Logout
// ============================================================================

#[tokio::test]
async fn test_logout_revokes_access_token() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let logout = app
        .logout(&session.access_token, &session.refresh_token)
        .await
        .unwrap();
    assert_eq!(logout.status, StatusCode::OK);
    assert_eq!(logout.body["message"], "Logged out successfully");

    // Still cryptographically valid, but revoked
    assert!(app.jwt.validate_access_token(&session.access_token).is_ok());
    let me = app.get_auth("/api/user/me", &session.access_token).await.unwrap();
    assert_eq!(me.status, StatusCode::UNAUTHORIZED);
    assert_eq!(me.error_code(), "TOKEN_REVOKED");
    assert_eq!(me.error_message(), "Token has been revoked");

    let refreshed = app.refresh(&session.refresh_token).await.unwrap();
    assert_eq!(refreshed.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_twice_succeeds() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let first = app
        .logout(&session.access_token, &session.refresh_token)
        .await
        .unwrap();
    let second = app
        .logout(&session.access_token, &session.refresh_token)
        .await
        .unwrap();

    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(second.status, StatusCode::OK);
    assert_eq!(app.revoked_tokens.len(), 1);
    assert!(app.refresh_tokens.is_empty());
}

#[tokio::test]
async fn test_logout_requires_refresh_token() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let missing = app
        .post(
            "/api/auth/logout",
            &json!({"access_token": session.access_token}),
        )
        .await
        .unwrap();
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    assert_eq!(missing.error_code(), "INVALID_REQUEST_BODY");

    let empty = app.logout(&session.access_token, "").await.unwrap();
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
    assert_eq!(empty.error_code(), "VALIDATION_ERROR");

    // Nothing was revoked or dropped, so the session still refreshes
    assert!(app.revoked_tokens.is_empty());
    assert_eq!(app.refresh_tokens.len(), 1);
    let refreshed = app.refresh(&session.refresh_token).await.unwrap();
    assert_eq!(refreshed.status, StatusCode::OK);
}

#[tokio::test]
async fn test_logout_with_invalid_access_token_revokes_nothing() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let response = app.logout("garbage", &session.refresh_token).await.unwrap();
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_message(), "Invalid access token");
    assert!(app.revoked_tokens.is_empty());
    assert_eq!(app.refresh_tokens.len(), 1);
}

// ============================================================================
// End to end
// ============================================================================

#[tokio::test]
async fn test_session_lifecycle_end_to_end() {
    let app = app();

    let registered = app.register("a@b.com", "Secret123", "alice").await.unwrap();
    assert_eq!(registered.status, StatusCode::CREATED);

    let login = app.login("a@b.com", "Secret123").await.unwrap();
    assert_eq!(login.status, StatusCode::OK);
    let access = login.body["access_token"].as_str().unwrap().to_string();
    let refresh = login.body["refresh_token"].as_str().unwrap().to_string();
    assert!(!access.is_empty() && !refresh.is_empty());
    assert_ne!(access, refresh);

    let me = app.get_auth("/api/user/me", &access).await.unwrap();
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["user"]["username"], "alice");

    let refreshed = app.refresh(&refresh).await.unwrap();
    assert_eq!(refreshed.status, StatusCode::OK);
    assert_ne!(refreshed.body["access_token"].as_str().unwrap(), access);

    let logout = app.logout(&access, &refresh).await.unwrap();
    assert_eq!(logout.status, StatusCode::OK);

    let me_again = app.get_auth("/api/user/me", &access).await.unwrap();
    assert_eq!(me_again.status, StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Maintenance and surface
// ============================================================================

#[tokio::test]
async fn test_token_purge_task_removes_expired_rows() {
    let app = app();
    let now = Utc::now();
    app.refresh_tokens
        .insert_raw(UserId::new(1), "lapsed", now - chrono::Duration::hours(1));
    app.refresh_tokens
        .insert_raw(UserId::new(1), "live", now + chrono::Duration::hours(1));

    let handle = spawn_token_purge(app.state.clone(), Duration::from_secs(3600));
    for _ in 0..50 {
        if app.refresh_tokens.len() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.abort();

    assert_eq!(app.refresh_tokens.len(), 1);
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = app();

    let health = app.get("/health").await.unwrap();
    assert_eq!(health.status, StatusCode::OK);
    assert_eq!(health.body["status"], "healthy");
    assert!(health.body["version"].is_string());

    let ping = app.get("/ping").await.unwrap();
    assert_eq!(ping.body["message"], "pong");

    let root = app.get("/").await.unwrap();
    assert_eq!(root.body["message"], "Blog API v1.0");
}

#[tokio::test]
async fn test_readiness_reports_unreachable_database() {
    let app = app();

    let ready = app.get("/health/ready").await.unwrap();
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(ready.body["database"], "down");
}

#[tokio::test]
async fn test_storage_failures_are_masked() {
    let app = app();

    // Posts live in PostgreSQL, which this app cannot reach
    let response = app.get("/api/posts").await.unwrap();
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_message(), "Internal server error");
    assert!(!String::from_utf8_lossy(&response.raw).contains("127.0.0.1"));
}

#[tokio::test]
async fn test_mutating_routes_require_auth() {
    let app = app();

    for (method, uri) in [
        (Method::POST, "/api/posts"),
        (Method::GET, "/api/posts/my"),
        (Method::GET, "/api/feed"),
        (Method::POST, "/api/posts/1/like"),
        (Method::POST, "/api/posts/1/bookmark"),
        (Method::GET, "/api/bookmarks"),
        (Method::DELETE, "/api/comments/1"),
        (Method::POST, "/api/users/alice/follow"),
        (Method::POST, "/api/topics"),
        (Method::GET, "/api/user/topics"),
    ] {
        let response = app.request(method.clone(), uri, None, None).await.unwrap();
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {uri}");
    }
}

#[tokio::test]
async fn test_invalid_path_id_is_bad_request() {
    let app = app();
    let session = app.session("a@b.com", PASSWORD, "alice").await.unwrap();

    let response = app
        .request(
            Method::DELETE,
            "/api/posts/not-a-number",
            None,
            Some(&format!("Bearer {}", session.access_token)),
        )
        .await
        .unwrap();
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "INVALID_PATH_PARAMETER");
}
