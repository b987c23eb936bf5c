//! Data Transfer Objects
//!
//! Response types for the API endpoints. The station and line payloads are
//! proxied verbatim from upstream and have no DTOs here.

use serde::Serialize;

use crate::poller::FeedHealth;

/// Full health status response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall status: "healthy", "degraded", "unhealthy", or "starting"
    pub status: String,
    /// Live prediction feed health
    pub feed: FeedHealth,
    /// Number of connected WebSocket clients
    pub websocket_connections: usize,
    /// Seconds since the server started
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
