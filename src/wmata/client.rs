//! WMATA REST API Client
//!
//! HTTP client for the WMATA Rail API. Every request carries the `api_key`
//! header. Payloads are returned as raw JSON bytes; the caller decides
//! whether to cache, proxy, or broadcast them.

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::WmataConfig;

/// Station list endpoint path
const STATIONS_PATH: &str = "/Rail.svc/json/jStations";
/// Line list endpoint path
const LINES_PATH: &str = "/Rail.svc/json/jLines";
/// All-station live prediction endpoint path
const PREDICTIONS_PATH: &str = "/StationPrediction.svc/json/GetPrediction/All";

/// Upstream rail data source
///
/// Implemented by [`WmataClient`] in production and by stubs in tests.
#[async_trait]
pub trait RailApi: Send + Sync {
    /// Fetch the station list
    async fn stations(&self) -> Result<Vec<u8>, WmataError>;

    /// Fetch the line list
    async fn lines(&self) -> Result<Vec<u8>, WmataError>;

    /// Fetch live arrival predictions for all stations
    async fn predictions(&self) -> Result<Vec<u8>, WmataError>;
}

/// WMATA Rail API client
pub struct WmataClient {
    client: Client,
    config: WmataConfig,
}

impl WmataClient {
    /// Create a new client with the given configuration
    pub fn new(config: WmataConfig) -> Result<Self, WmataError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(WmataError::Request)?;

        Ok(Self { client, config })
    }

    /// Get the current configuration
    pub fn config(&self) -> &WmataConfig {
        &self.config
    }

    /// Whether an API key has been configured
    pub fn has_api_key(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Send a GET request and return the body bytes
    async fn get_raw(&self, path: &str) -> Result<Vec<u8>, WmataError> {
        let url = self.endpoint(path);

        let response = self
            .client
            .get(&url)
            .header("api_key", &self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    WmataError::Timeout
                } else if e.is_connect() {
                    WmataError::Unavailable
                } else {
                    WmataError::Request(e)
                }
            })?;

        if response.status().is_success() {
            let body = response.bytes().await.map_err(WmataError::Request)?;
            Ok(body.to_vec())
        } else {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            Err(WmataError::ApiError {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}

#[async_trait]
impl RailApi for WmataClient {
    async fn stations(&self) -> Result<Vec<u8>, WmataError> {
        self.get_raw(STATIONS_PATH).await
    }

    async fn lines(&self) -> Result<Vec<u8>, WmataError> {
        self.get_raw(LINES_PATH).await
    }

    async fn predictions(&self) -> Result<Vec<u8>, WmataError> {
        self.get_raw(PREDICTIONS_PATH).await
    }
}

/// Errors that can occur when communicating with the WMATA API
#[derive(Error, Debug)]
pub enum WmataError {
    #[error("WMATA API unavailable")]
    Unavailable,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Request timeout")]
    Timeout,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = WmataClient::new(WmataConfig {
            api_key: "test-key".to_string(),
            base_url: "https://api.wmata.com".to_string(),
            request_timeout_ms: 1000,
        })
        .unwrap();

        assert_eq!(
            client.endpoint(STATIONS_PATH),
            "https://api.wmata.com/Rail.svc/json/jStations"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = WmataClient::new(WmataConfig {
            api_key: String::new(),
            base_url: "http://localhost:8080/".to_string(),
            request_timeout_ms: 1000,
        })
        .unwrap();

        assert_eq!(
            client.endpoint(LINES_PATH),
            "http://localhost:8080/Rail.svc/json/jLines"
        );
    }

    #[test]
    fn test_has_api_key() {
        let client = WmataClient::new(WmataConfig::default()).unwrap();
        assert!(!client.has_api_key());

        let client = WmataClient::new(WmataConfig {
            api_key: "abc".to_string(),
            ..Default::default()
        })
        .unwrap();
        assert!(client.has_api_key());
    }
}
