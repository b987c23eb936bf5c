//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::cache::ResponseCache;
use crate::config::ServerConfig;
use crate::poller::PredictionPoller;
use crate::websocket::ConnectionHub;
use crate::wmata::RailApi;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream rail data source
    pub rail: Arc<dyn RailApi>,
    /// Cache of upstream station/line responses
    pub cache: Arc<ResponseCache>,
    /// WebSocket connection hub for the live prediction feed
    pub ws_hub: Arc<ConnectionHub>,
    /// Prediction poller, queried for feed health
    pub poller: Arc<PredictionPoller>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Whether an upstream API key is configured
    pub api_key_configured: bool,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(
        rail: Arc<dyn RailApi>,
        cache: Arc<ResponseCache>,
        ws_hub: Arc<ConnectionHub>,
        poller: Arc<PredictionPoller>,
        config: ServerConfig,
        api_key_configured: bool,
    ) -> Self {
        Self {
            rail,
            cache,
            ws_hub,
            poller,
            config: Arc::new(config),
            api_key_configured,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get WebSocket connection count
    pub async fn ws_connection_count(&self) -> usize {
        self.ws_hub.connection_count().await
    }
}
