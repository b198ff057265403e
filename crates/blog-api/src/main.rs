//! Blog API Server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p blog-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use blog_common::{try_init_tracing, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Configuration decides the log format, so it is loaded before tracing
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            if let Err(te) = try_init_tracing(TracingConfig::default()) {
                eprintln!("Warning: Failed to initialize tracing: {te}");
            }
            error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = try_init_tracing(TracingConfig::for_app(&config.app)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        env = ?config.app.env,
        port = config.api.port,
        "Configuration loaded"
    );

    if let Err(e) = blog_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
