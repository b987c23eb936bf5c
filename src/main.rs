//! Metroboard Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Loaded from a TOML file (`--config`, `$XDG_CONFIG_HOME/metroboard/
//! config.toml`, `/etc/metroboard/config.toml`, or `./config.toml`) with
//! environment overrides:
//! - `METROBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `METROBOARD_PORT`: Port to listen on (default: 9966)
//! - `METROBOARD_STATIC_DIR`: Frontend build directory (default: ./public)
//! - `METROBOARD_API_KEY`: WMATA API key
//! - `METROBOARD_WMATA_URL`: WMATA API base URL
//! - `METROBOARD_POLL_INTERVAL_SECS`: Prediction poll interval
//! - `METROBOARD_LOG_LEVEL` / `METROBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Overrides the log filter entirely

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use metroboard::api::{serve, AppState};
use metroboard::cache::ResponseCache;
use metroboard::config::{generate_default_config, Config};
use metroboard::poller::PredictionPoller;
use metroboard::websocket::{ConnectionHub, HubConfig};
use metroboard::wmata::{RailApi, WmataClient};

#[derive(Parser, Debug)]
#[command(name = "metroboard", version, about = "Realtime Washington Metro dashboard server")]
struct Args {
    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Print a default config file and exit
    #[arg(long)]
    print_default_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if args.print_default_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(port) = args.port {
        config.server.port = port;
    }

    init_tracing(&config);

    tracing::info!("Starting Metroboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static directory: {}", config.server.static_dir);

    let api_key_configured = !config.wmata.api_key.is_empty();
    if !api_key_configured {
        tracing::warn!(
            "No WMATA API key configured (set METROBOARD_API_KEY); upstream requests will fail"
        );
    }

    // Upstream client
    let rail: Arc<dyn RailApi> = Arc::new(WmataClient::new(config.wmata.clone())?);

    // Response cache with its janitor
    let cache = Arc::new(ResponseCache::new(&config.cache));
    let janitor = Arc::clone(&cache).start_janitor();

    // WebSocket hub
    let hub = Arc::new(ConnectionHub::new(HubConfig {
        max_connections: config.server.max_ws_connections,
    }));

    // Prediction poller feeding the hub
    let poller = Arc::new(PredictionPoller::new(
        Arc::clone(&rail),
        Arc::clone(&hub),
        &config.poller,
    ));
    let poll_task = if config.poller.enabled && api_key_configured {
        tracing::info!(
            interval_secs = config.poller.interval_secs,
            "Starting prediction poller"
        );
        Some(Arc::clone(&poller).start())
    } else {
        tracing::info!("Prediction poller disabled");
        None
    };

    // Run server
    let state = AppState::new(
        rail,
        cache,
        hub,
        Arc::clone(&poller),
        config.server.clone(),
        api_key_configured,
    );
    serve(state, &config.server).await?;

    // Graceful shutdown
    poller.stop().await;
    if let Some(task) = poll_task {
        task.abort();
    }
    janitor.abort();

    tracing::info!("Metroboard stopped");
    Ok(())
}

/// Initialize tracing from config, honoring RUST_LOG when set
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "metroboard={},tower_http=debug",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
