//! Route definitions
//!
//! Health probes live at the root; everything else is mounted under /api.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers::{auth, bookmarks, comments, follows, health, likes, posts, topics, users};
use crate::state::AppState;

/// Create the full router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api", api_routes())
}

/// Health check and banner routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/ping", get(health::ping))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(user_routes())
        .merge(post_routes())
        .merge(comment_routes())
        .merge(topic_routes())
}

/// Authentication routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/refresh", post(auth::refresh_token))
        .route("/auth/logout", post(auth::logout))
        .route("/user/me", get(auth::me))
        .route("/user/topics", get(topics::my_topics))
}

/// Public profiles and follows
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:username", get(users::get_profile))
        .route("/users/:username/posts", get(users::get_user_posts))
        .route(
            "/users/:username/follow",
            post(follows::follow_user)
                .delete(follows::unfollow_user)
                .get(follows::follow_status),
        )
}

/// Posts, feed, likes and bookmarks
///
/// `GET /posts/:post` takes a slug; every other `:post` segment is a numeric id.
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/my", get(posts::my_posts))
        .route(
            "/posts/:post",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route(
            "/posts/:post/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/posts/:post/like",
            post(likes::like_post)
                .delete(likes::unlike_post)
                .get(likes::like_status),
        )
        .route("/posts/:post/likes", get(likes::like_count))
        .route(
            "/posts/:post/bookmark",
            post(bookmarks::add_bookmark)
                .delete(bookmarks::remove_bookmark)
                .get(bookmarks::bookmark_status),
        )
        .route("/bookmarks", get(bookmarks::list_bookmarks))
        .route("/feed", get(posts::feed))
}

fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment",
        put(comments::update_comment).delete(comments::delete_comment),
    )
}

/// Topics and topic follows
fn topic_routes() -> Router<AppState> {
    Router::new()
        .route("/topics", get(topics::list_topics).post(topics::create_topic))
        .route("/topics/:slug", get(topics::get_topic))
        .route(
            "/topics/:slug/follow",
            post(topics::follow_topic)
                .delete(topics::unfollow_topic)
                .get(topics::topic_follow_status),
        )
}
