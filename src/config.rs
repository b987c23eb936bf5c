//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub wmata: WmataConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub poller: PollerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served for non-API paths, with an index.html SPA fallback
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Maximum concurrent WebSocket connections
    #[serde(default = "default_max_ws_connections")]
    pub max_ws_connections: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    // The port the frontend bootstrap appends in development
    9966
}

fn default_static_dir() -> String {
    "./public".to_string()
}

fn default_max_ws_connections() -> usize {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            max_ws_connections: default_max_ws_connections(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// WMATA Rail API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WmataConfig {
    /// API key sent in the `api_key` header on every upstream request
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_wmata_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_wmata_base_url() -> String {
    "https://api.wmata.com".to_string()
}

fn default_request_timeout() -> u64 {
    10_000
}

impl Default for WmataConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_wmata_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Response cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a cached upstream body stays valid (seconds)
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,

    /// How often the janitor purges expired entries (seconds)
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

fn default_cache_ttl() -> u64 {
    60
}

fn default_sweep_interval() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

/// Prediction poller configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PollerConfig {
    #[serde(default = "default_poller_enabled")]
    pub enabled: bool,

    /// Seconds between upstream prediction fetches
    #[serde(default = "default_poll_interval")]
    pub interval_secs: u64,
}

fn default_poller_enabled() -> bool {
    true
}

fn default_poll_interval() -> u64 {
    15
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            enabled: default_poller_enabled(),
            interval_secs: default_poll_interval(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("metroboard").join("config.toml")),
            Some(PathBuf::from("/etc/metroboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        // Server overrides
        if let Ok(host) = std::env::var("METROBOARD_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("METROBOARD_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(dir) = std::env::var("METROBOARD_STATIC_DIR") {
            self.server.static_dir = dir;
        }

        // WMATA overrides
        if let Ok(key) = std::env::var("METROBOARD_API_KEY") {
            self.wmata.api_key = key;
        }
        if let Ok(url) = std::env::var("METROBOARD_WMATA_URL") {
            self.wmata.base_url = url;
        }

        // Poller overrides
        if let Ok(secs) = std::env::var("METROBOARD_POLL_INTERVAL_SECS") {
            if let Ok(s) = secs.parse() {
                self.poller.interval_secs = s;
            }
        }

        // Logging overrides
        if let Ok(level) = std::env::var("METROBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("METROBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            wmata: WmataConfig::default(),
            cache: CacheConfig::default(),
            poller: PollerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Metroboard Configuration
#
# Environment variables override these settings:
# - METROBOARD_HOST
# - METROBOARD_PORT
# - METROBOARD_STATIC_DIR
# - METROBOARD_API_KEY
# - METROBOARD_WMATA_URL
# - METROBOARD_POLL_INTERVAL_SECS
# - METROBOARD_LOG_LEVEL
# - METROBOARD_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port (the frontend appends :9966 when running against localhost)
port = 9966

# Directory served for non-API paths (the built frontend)
static_dir = "./public"

# Maximum concurrent WebSocket connections
max_ws_connections = 1000

[wmata]
# WMATA API key (get one at developer.wmata.com)
api_key = ""

# WMATA API base URL
base_url = "https://api.wmata.com"

# Upstream request timeout (ms)
request_timeout_ms = 10000

[cache]
# How long cached station/line responses stay valid (seconds)
ttl_secs = 60

# How often expired entries are purged (seconds)
sweep_interval_secs = 60

[poller]
# Poll live train predictions and stream them to WebSocket clients
enabled = true

# Seconds between prediction fetches
interval_secs = 15

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
