//! Contract Trigger Webhook Simulator
//!
//! HTTP harness for testing contract trigger webhooks without a Web3
//! connection:
//! - Per-client sliding-window rate limiting
//! - Trigger payload validation
//! - Append-only JSON-lines trigger log
//!
//! No smart contract transaction is ever executed.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use api::middleware::rate_limit::RateLimitConfig;
use api::{router, AppState};
use sink::{JsonlSink, SinkConfig};
use telemetry::init_tracing_from_env;
use trigger_core::limits::DEFAULT_PORT;

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// Contract address the simulation stands in for (never contacted)
    #[serde(default)]
    contract_address: Option<String>,

    /// Web3 provider URL the simulation stands in for (never contacted)
    #[serde(default)]
    web3_provider: Option<String>,

    #[serde(default)]
    rate_limit: RateLimitConfig,

    #[serde(default)]
    sink: SinkConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            contract_address: None,
            web3_provider: None,
            rate_limit: RateLimitConfig::default(),
            sink: SinkConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!("Starting Contract Trigger Simulator v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config()?;

    info!(
        limit = config.rate_limit.limit,
        window_secs = config.rate_limit.window_secs,
        log_file = %config.sink.log_file,
        "Loaded configuration"
    );

    if let Some(contract) = &config.contract_address {
        info!(contract = %contract, "Simulating triggers for contract (no chain connection)");
    }
    if let Some(provider) = &config.web3_provider {
        info!(provider = %provider, "Web3 provider configured but unused in simulation mode");
    }

    // Open the trigger log
    let sink = Arc::new(
        JsonlSink::open(config.sink.clone())
            .await
            .context("Failed to open trigger log")?,
    );

    // Create application state; an invalid rate limit config is fatal here
    let state = AppState::with_rate_limit(sink, config.rate_limit.clone())
        .context("Invalid rate limit configuration")?;

    // Start rate limiter cleanup background task
    let _rate_limiter_cleanup = state.start_rate_limiter_cleanup();
    info!("Started rate limiter cleanup task (every 5 minutes)");

    // Create router
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("TRIGGER")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested sections from environment
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(limit) = std::env::var("TRIGGER_RATE_LIMIT_REQUESTS") {
        config.rate_limit.limit = limit
            .parse()
            .context("TRIGGER_RATE_LIMIT_REQUESTS must be an integer")?;
    }
    if let Ok(window) = std::env::var("TRIGGER_RATE_WINDOW_SECS") {
        config.rate_limit.window_secs = window
            .parse()
            .context("TRIGGER_RATE_WINDOW_SECS must be an integer")?;
    }
    if let Ok(log_file) = std::env::var("TRIGGER_LOG_FILE") {
        config.sink.log_file = log_file;
    }
    if let Ok(contract) = std::env::var("TRIGGER_CONTRACT_ADDRESS") {
        config.contract_address = Some(contract);
    }
    if let Ok(provider) = std::env::var("TRIGGER_WEB3_PROVIDER") {
        config.web3_provider = Some(provider);
    }

    Ok(config)
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
