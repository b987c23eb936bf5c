//! Metroboard HTTP API
//!
//! HTTP layer for Metroboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Rail data (cached upstream proxy)
//! - `GET /api/stations` - Station list
//! - `GET /api/lines` - Line list
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /ws` - Live prediction stream
//!
//! ## Static
//! - Any other path serves the frontend build from the configured static
//!   directory, with an index.html SPA fallback
//!
//! # Example
//!
//! ```rust,ignore
//! use metroboard::api::{serve, AppState};
//! use metroboard::cache::ResponseCache;
//! use metroboard::config::Config;
//! use metroboard::poller::PredictionPoller;
//! use metroboard::websocket::{ConnectionHub, HubConfig};
//! use metroboard::wmata::WmataClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load_default();
//!     let rail = Arc::new(WmataClient::new(config.wmata.clone())?);
//!     let cache = Arc::new(ResponseCache::new(&config.cache));
//!     let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
//!     let poller = Arc::new(PredictionPoller::new(
//!         rail.clone(), hub.clone(), &config.poller,
//!     ));
//!
//!     let state = AppState::new(rail, cache, hub, poller, config.server.clone(), true);
//!     serve(state, &config.server).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::websocket::websocket_handler;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/stations", get(routes::rail::stations))
        .route("/lines", get(routes::rail::lines))
        // Unknown API paths get a JSON 404, not the SPA fallback
        .fallback(api_not_found);

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    // Everything else serves the frontend build, falling back to
    // index.html so client-side routes resolve
    let static_dir = PathBuf::from(&state.config.static_dir);
    let spa = ServeDir::new(&static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
        .route("/ws", get(websocket_handler))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Fallback for unmatched /api paths
async fn api_not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("No such endpoint: {}", uri.path()))
}

/// Start the API server
pub async fn serve(state: AppState, config: &ServerConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Metroboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Metroboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ResponseCache;
    use crate::config::{CacheConfig, PollerConfig, ServerConfig};
    use crate::poller::PredictionPoller;
    use crate::websocket::{ConnectionHub, HubConfig};
    use crate::wmata::{RailApi, WmataError};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use tempfile::tempdir;
    use tower::util::ServiceExt;

    /// Stub upstream recording how often each endpoint is hit
    struct StubApi {
        station_calls: AtomicUsize,
        line_calls: AtomicUsize,
        fail: AtomicBool,
    }

    impl StubApi {
        fn new() -> Self {
            Self {
                station_calls: AtomicUsize::new(0),
                line_calls: AtomicUsize::new(0),
                fail: AtomicBool::new(false),
            }
        }
    }

    #[async_trait]
    impl RailApi for StubApi {
        async fn stations(&self) -> Result<Vec<u8>, WmataError> {
            self.station_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                Err(WmataError::Unavailable)
            } else {
                Ok(br#"{"Stations":[{"Code":"A01","Name":"Metro Center"}]}"#.to_vec())
            }
        }

        async fn lines(&self) -> Result<Vec<u8>, WmataError> {
            self.line_calls.fetch_add(1, Ordering::SeqCst);
            Ok(br#"{"Lines":[{"LineCode":"RD","DisplayName":"Red"}]}"#.to_vec())
        }

        async fn predictions(&self) -> Result<Vec<u8>, WmataError> {
            Ok(br#"{"Trains":[]}"#.to_vec())
        }
    }

    fn create_test_app(api_key_configured: bool) -> (Router, Arc<StubApi>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<html>metroboard</html>").unwrap();

        let server_config = ServerConfig {
            static_dir: dir.path().to_string_lossy().to_string(),
            ..Default::default()
        };

        let stub = Arc::new(StubApi::new());
        let rail: Arc<dyn RailApi> = stub.clone();
        let cache = Arc::new(ResponseCache::new(&CacheConfig::default()));
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let poller = Arc::new(PredictionPoller::new(
            Arc::clone(&rail),
            Arc::clone(&hub),
            &PollerConfig::default(),
        ));

        let state = AppState::new(rail, cache, hub, poller, server_config, api_key_configured);
        let router = build_router(state);

        (router, stub, dir)
    }

    #[tokio::test]
    async fn test_health_live() {
        let (app, _stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/live")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let (app, _stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready_without_api_key() {
        let (app, _stub, _dir) = create_test_app(false);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health/ready")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_health_full() {
        let (app, _stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_stations_proxied_with_json_content_type() {
        let (app, stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(stub.station_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stations_second_request_served_from_cache() {
        let (app, stub, _dir) = create_test_app(true);

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .uri("/api/stations")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        // Only the first request reached upstream
        assert_eq!(stub.station_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lines_proxied() {
        let (app, stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/lines")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stub.line_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_maps_to_bad_gateway() {
        let (app, stub, _dir) = create_test_app(true);
        stub.fail.store(true, Ordering::SeqCst);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_cached() {
        let (app, stub, _dir) = create_test_app(true);
        stub.fail.store(true, Ordering::SeqCst);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        // Upstream recovers; the next request must go back upstream
        stub.fail.store(false, Ordering::SeqCst);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/stations")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(stub.station_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unknown_api_path_is_json_404() {
        let (app, _stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/trains")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_unknown_path_serves_spa_fallback() {
        let (app, _stub, _dir) = create_test_app(true);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/some/client/route")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
