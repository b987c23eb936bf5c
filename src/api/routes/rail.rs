//! Rail Routes
//!
//! Cached proxy endpoints for the upstream station and line lists.
//!
//! - GET /api/stations - Station list
//! - GET /api/lines - Line list
//!
//! Both endpoints serve the upstream JSON verbatim. A cache miss fetches
//! upstream and stores the body; hits are served from memory until the TTL
//! expires. Station and line data changes rarely, so the short TTL exists
//! mostly to shed load from browser refreshes.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::future::Future;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::cache::ResponseCache;
use crate::wmata::WmataError;

/// Cache key for the station list
const STATIONS_KEY: &str = "stations";
/// Cache key for the line list
const LINES_KEY: &str = "lines";

/// GET /api/stations
///
/// Cached proxy of the upstream station list.
pub async fn stations(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    serve_cached(&state.cache, STATIONS_KEY, state.rail.stations()).await
}

/// GET /api/lines
///
/// Cached proxy of the upstream line list.
pub async fn lines(State(state): State<Arc<AppState>>) -> ApiResult<Response> {
    serve_cached(&state.cache, LINES_KEY, state.rail.lines()).await
}

/// Serve a cached upstream body, fetching and caching on a miss
async fn serve_cached(
    cache: &ResponseCache,
    key: &str,
    fetch: impl Future<Output = Result<Vec<u8>, WmataError>>,
) -> ApiResult<Response> {
    if let Some(body) = cache.get(key).await {
        tracing::debug!(key, "Cache hit");
        return Ok(json_response(body.as_ref().clone()));
    }

    tracing::debug!(key, "Cache miss, fetching upstream");
    let body = fetch.await?;
    cache.insert(key, body.clone()).await;

    Ok(json_response(body))
}

/// Wrap raw upstream JSON bytes in a response
fn json_response(body: Vec<u8>) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
