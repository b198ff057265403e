//! # blog-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `blog-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use blog_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/blog")).await?;
//!     run_migrations(&pool, "migrations").await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{connect_lazy, create_pool, ping, run_migrations, DatabaseConfig, DbError, PgPool};
pub use repositories::{
    PgBookmarkRepository, PgCommentRepository, PgFollowRepository, PgLikeRepository,
    PgPostRepository, PgRefreshTokenRepository, PgRevokedTokenRepository,
    PgTopicFollowRepository, PgTopicRepository, PgUserRepository,
};
