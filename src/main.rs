//! ReqHub Server: collection, folder and request tree backend.
//!
//! Main entry point that loads configuration, initializes logging, opens
//! the configured store and starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use reqhub_core::config::AppConfig;
use reqhub_core::error::AppError;
use reqhub_database::Store;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e.chain(), "Server error");
        std::process::exit(1);
    }
}

/// Load configuration from `config/` and the environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("REQHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ReqHub v{}", env!("CARGO_PKG_VERSION"));

    let store = Store::connect(&config.database).await?;
    tracing::info!(backend = store.backend_name(), "Store ready");

    reqhub_api::run_server(config, store).await
}
