//! HTTP API Client
//!
//! Functions for communicating with the Metroboard REST API. The base URL
//! comes from the bootstrap-derived `API_URL` prop, not from here.

use gloo_net::http::Request;

use crate::state::global::{Line, Station};

// ============ Response Types ============

#[derive(Debug, serde::Deserialize)]
pub struct StationListResponse {
    #[serde(rename = "Stations", default)]
    pub stations: Vec<Station>,
}

#[derive(Debug, serde::Deserialize)]
pub struct LineListResponse {
    #[serde(rename = "Lines", default)]
    pub lines: Vec<Line>,
}

/// Error body the backend returns for failed requests
#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

// ============ API Functions ============

/// Fetch the station list
pub async fn fetch_stations(api_base: &str) -> Result<Vec<Station>, String> {
    let response = Request::get(&format!("{}/stations", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: StationListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.stations)
}

/// Fetch the line list
pub async fn fetch_lines(api_base: &str) -> Result<Vec<Line>, String> {
    let response = Request::get(&format!("{}/lines", api_base))
        .send()
        .await
        .map_err(|e| format!("Network error: {}", e))?;

    if !response.ok() {
        return Err(error_message(response).await);
    }

    let result: LineListResponse = response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))?;

    Ok(result.lines)
}

/// Extract a readable message from an error response
async fn error_message(response: gloo_net::http::Response) -> String {
    match response.json::<ApiErrorResponse>().await {
        Ok(body) => body.error.message,
        Err(_) => format!("Request failed with status {}", response.status()),
    }
}
