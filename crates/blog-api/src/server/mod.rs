//! Server setup and initialization
//!
//! Provides the application builder, the background token purge and the server runner.

use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use blog_common::{AppConfig, AppError, JwtService};
use blog_db::{
    create_pool, run_migrations, PgBookmarkRepository, PgCommentRepository, PgFollowRepository,
    PgLikeRepository, PgPostRepository, PgRefreshTokenRepository, PgRevokedTokenRepository,
    PgTopicFollowRepository, PgTopicRepository, PgUserRepository,
};
use blog_service::{AuthService, ServiceContextBuilder};
use chrono::Utc;
use tokio::net::{TcpListener, ToSocketAddrs};
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::middleware::apply_middleware;
use crate::routes::create_router;
use crate::state::AppState;

/// How often expired refresh tokens and revocation records are deleted
pub const TOKEN_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = apply_middleware(
        create_router(),
        &config.cors,
        config.app.env.is_production(),
    );
    router.with_state(state)
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    info!("Connecting to PostgreSQL...");
    let db_config = blog_db::DatabaseConfig {
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        ..blog_db::DatabaseConfig::new(config.database.url.clone())
    };
    let pool = create_pool(&db_config)
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;
    info!("PostgreSQL connection established");

    if config.database.run_migrations {
        run_migrations(&pool, &config.database.migrations_dir)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
    }

    let jwt_service = Arc::new(JwtService::from_config(&config.jwt));

    let service_context = ServiceContextBuilder::new()
        .user_repo(Arc::new(PgUserRepository::new(pool.clone())))
        .refresh_token_repo(Arc::new(PgRefreshTokenRepository::new(pool.clone())))
        .revoked_token_repo(Arc::new(PgRevokedTokenRepository::new(pool.clone())))
        .post_repo(Arc::new(PgPostRepository::new(pool.clone())))
        .comment_repo(Arc::new(PgCommentRepository::new(pool.clone())))
        .topic_repo(Arc::new(PgTopicRepository::new(pool.clone())))
        .like_repo(Arc::new(PgLikeRepository::new(pool.clone())))
        .bookmark_repo(Arc::new(PgBookmarkRepository::new(pool.clone())))
        .follow_repo(Arc::new(PgFollowRepository::new(pool.clone())))
        .topic_follow_repo(Arc::new(PgTopicFollowRepository::new(pool.clone())))
        .jwt_service(jwt_service)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config, pool))
}

/// Periodically delete expired refresh tokens and revocation records
///
/// The first purge runs immediately.
pub fn spawn_token_purge(state: AppState, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let service = AuthService::new(state.service_context());
            match service.purge_expired_tokens(Utc::now()).await {
                Ok(report) => info!(
                    refresh_tokens = report.refresh_tokens,
                    revoked_tokens = report.revoked_tokens,
                    "Expired tokens purged"
                ),
                Err(e) => error!(error = %e, "Token purge failed"),
            }
        }
    })
}

/// Run the HTTP server
pub async fn run_server(
    app: Router,
    addr: impl ToSocketAddrs + Display,
) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {addr}: {e}")))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Config(format!("Server error: {e}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        return std::future::pending().await;
    }
    info!("Shutdown signal received");
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = config.api.address();

    let state = create_app_state(config).await?;
    let purge = spawn_token_purge(state.clone(), TOKEN_PURGE_INTERVAL);

    let app = create_app(state);
    let result = run_server(app, addr).await;
    purge.abort();
    result
}
