//! Endpoint Configuration
//!
//! Derives the API and WebSocket base URLs from the page location.
//!
//! When the page is served from a development host (hostname containing
//! `localhost`), the backend is assumed to be listening on its default
//! port 9966 rather than behind the same origin, so the port is appended.
//! In production the frontend is served by the backend itself and the
//! hostname is used as-is.

/// Port the backend listens on in development
pub const DEV_PORT: u16 = 9966;

/// Base URLs handed to the root component as props
#[derive(Clone, Debug, PartialEq)]
pub struct Endpoints {
    /// HTTP(S) API root, e.g. `https://example.com/api`
    pub api_url: String,
    /// WebSocket root, e.g. `ws://example.com/ws`
    pub ws_url: String,
}

impl Endpoints {
    /// Derive endpoints from a page protocol (`"http:"` / `"https:"`) and
    /// hostname
    pub fn derive(protocol: &str, hostname: &str) -> Self {
        let dev = hostname.contains("localhost");

        let server = if dev {
            format!("{}:{}", hostname, DEV_PORT)
        } else {
            hostname.to_string()
        };

        Self {
            api_url: format!("{}//{}/api", protocol, server),
            // The live feed is plain ws even on https pages
            ws_url: format!("ws://{}/ws", server),
        }
    }

    /// Derive endpoints from the current page location
    ///
    /// Returns None outside a browser context.
    pub fn from_location() -> Option<Self> {
        let window = web_sys::window()?;
        let location = window.location();
        let protocol = location.protocol().ok()?;
        let hostname = location.hostname().ok()?;
        Some(Self::derive(&protocol, &hostname))
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::derive("http:", "localhost")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_localhost_appends_dev_port() {
        let endpoints = Endpoints::derive("http:", "localhost");
        assert_eq!(endpoints.api_url, "http://localhost:9966/api");
        assert_eq!(endpoints.ws_url, "ws://localhost:9966/ws");
    }

    #[test]
    fn test_production_host_is_unchanged() {
        let endpoints = Endpoints::derive("https:", "example.com");
        assert_eq!(endpoints.api_url, "https://example.com/api");
        assert_eq!(endpoints.ws_url, "ws://example.com/ws");
    }

    #[test]
    fn test_localhost_substring_counts_as_dev() {
        let endpoints = Endpoints::derive("http:", "app.localhost");
        assert_eq!(endpoints.api_url, "http://app.localhost:9966/api");
        assert_eq!(endpoints.ws_url, "ws://app.localhost:9966/ws");
    }

    #[test]
    fn test_ws_url_stays_plain_ws_on_https() {
        let endpoints = Endpoints::derive("https:", "metro.example.org");
        assert!(endpoints.ws_url.starts_with("ws://"));
    }

    #[test]
    fn test_default_is_local_dev() {
        assert_eq!(Endpoints::default(), Endpoints::derive("http:", "localhost"));
    }
}
