//! Database connection pool management

mod postgres;

pub use postgres::{connect_lazy, create_pool, ping, run_migrations, DatabaseConfig, DbError};

// Re-export PgPool for convenience
pub use sqlx::postgres::PgPool;
