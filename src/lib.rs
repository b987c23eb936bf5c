//! # Metroboard
//!
//! Realtime Washington Metro dashboard backend: a caching proxy for the
//! WMATA Rail API with live train predictions streamed to browser clients
//! over WebSocket.
//!
//! ## Features
//!
//! - **Cached proxy**: station and line lists served from a TTL cache
//! - **Live feed**: predictions polled upstream and fanned out to every
//!   connected WebSocket client, with snapshot replay on connect
//! - **Single binary**: serves the API, the WebSocket feed, and the
//!   frontend build
//!
//! ## Modules
//!
//! - [`wmata`]: Upstream WMATA Rail API client
//! - [`cache`]: TTL cache for upstream responses
//! - [`poller`]: Background prediction poller
//! - [`websocket`]: Connection hub and live feed protocol
//! - [`api`]: HTTP server with Axum
//! - [`config`]: TOML + environment configuration

pub mod api;
pub mod cache;
pub mod config;
pub mod poller;
pub mod websocket;
pub mod wmata;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, ApiResult, AppState};

pub use cache::ResponseCache;

pub use config::{
    CacheConfig, Config, ConfigError, LoggingConfig, PollerConfig, ServerConfig, WmataConfig,
};

pub use poller::{FeedHealth, PredictionPoller};

pub use websocket::{websocket_handler, ClientMessage, ConnectionHub, HubConfig, HubError, ServerMessage};

pub use wmata::{RailApi, WmataClient, WmataError};
