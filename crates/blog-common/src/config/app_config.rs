//! Application configuration
//!
//! Loaded once at startup from environment variables (and a `.env` file
//! when present). Missing or malformed required values abort startup.

use chrono::Duration;
use std::env;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
    pub log_format: LogFormat,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "pretty" | "text" => Some(Self::Pretty),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
    pub migrations_dir: String,
}

/// Token signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expiry_minutes: i64,
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Saturates instead of panicking; the issuer rejects an out-of-range expiry
    #[must_use]
    pub fn access_token_ttl(&self) -> Duration {
        Duration::try_minutes(self.access_token_expiry_minutes).unwrap_or(Duration::MAX)
    }

    #[must_use]
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::try_days(self.refresh_token_expiry_days).unwrap_or(Duration::MAX)
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("access_token_expiry_minutes", &self.access_token_expiry_minutes)
            .field("refresh_token_expiry_days", &self.refresh_token_expiry_days)
            .finish()
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin (outside production)
    pub allowed_origins: Vec<String>,
}

// Default value functions
fn default_app_name() -> String {
    "blog-api".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    1
}

fn default_migrations_dir() -> String {
    "migrations".to_string()
}

fn default_access_token_expiry_minutes() -> i64 {
    15
}

fn default_refresh_token_expiry_days() -> i64 {
    7
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let env = var("APP_ENV")
            .and_then(|s| Environment::parse(&s))
            .unwrap_or_default();
        let log_format = var("LOG_FORMAT")
            .and_then(|s| LogFormat::parse(&s))
            .unwrap_or(if env.is_production() {
                LogFormat::Json
            } else {
                LogFormat::Pretty
            });

        Ok(Self {
            app: AppSettings {
                name: var("APP_NAME").unwrap_or_else(default_app_name),
                env,
                log_format,
            },
            api: ServerConfig {
                host: var("API_HOST").unwrap_or_else(default_host),
                port: parse_or("API_PORT", var("API_PORT"), default_port())?,
            },
            database: DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(
                    "DATABASE_MAX_CONNECTIONS",
                    var("DATABASE_MAX_CONNECTIONS"),
                    default_max_connections(),
                )?,
                min_connections: parse_or(
                    "DATABASE_MIN_CONNECTIONS",
                    var("DATABASE_MIN_CONNECTIONS"),
                    default_min_connections(),
                )?,
                run_migrations: parse_or(
                    "DATABASE_RUN_MIGRATIONS",
                    var("DATABASE_RUN_MIGRATIONS"),
                    true,
                )?,
                migrations_dir: var("DATABASE_MIGRATIONS_DIR")
                    .unwrap_or_else(default_migrations_dir),
            },
            jwt: JwtConfig {
                secret: var("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                access_token_expiry_minutes: parse_ttl(
                    "ACCESS_TOKEN_EXPIRY_MINUTES",
                    var("ACCESS_TOKEN_EXPIRY_MINUTES"),
                    default_access_token_expiry_minutes(),
                    Duration::try_minutes,
                )?,
                refresh_token_expiry_days: parse_ttl(
                    "REFRESH_TOKEN_EXPIRY_DAYS",
                    var("REFRESH_TOKEN_EXPIRY_DAYS"),
                    default_refresh_token_expiry_days(),
                    Duration::try_days,
                )?,
            },
            cors: CorsConfig {
                allowed_origins: var("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, value)),
        None => Ok(default),
    }
}

/// Longest token lifetime accepted from configuration
const MAX_TOKEN_TTL: Duration = Duration::days(3650);

/// A positive count of `unit`s that fits within [`MAX_TOKEN_TTL`]
fn parse_ttl(
    key: &'static str,
    raw: Option<String>,
    default: i64,
    unit: fn(i64) -> Option<Duration>,
) -> Result<i64, ConfigError> {
    let value = parse_or(key, raw, default)?;
    match unit(value) {
        Some(ttl) if value > 0 && ttl <= MAX_TOKEN_TTL => Ok(value),
        _ => Err(ConfigError::InvalidValue(key, value.to_string())),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
