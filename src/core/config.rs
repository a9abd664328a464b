//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, configuration files, or defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by domain for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Canvas API credentials configuration.
    pub canvas: CanvasConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the Canvas REST API.
///
/// The base URL points at the API root (e.g.
/// `https://canvas.instructure.com/api/v1`); its shape is not validated
/// here, a bad value simply fails on first use. A missing token is a
/// deferred failure: the server starts, and every API call fails until a
/// token is provided.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Root URL of the Canvas API.
    pub base_url: String,

    /// Bearer token for API access.
    pub api_token: String,
}

/// Custom Debug implementation to redact the token from logs.
impl std::fmt::Debug for CanvasConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CanvasConfig")
            .field("base_url", &self.base_url)
            .field(
                "api_token",
                if self.api_token.is_empty() {
                    &"[UNSET]"
                } else {
                    &"[REDACTED]"
                },
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "canvas-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
            canvas: CanvasConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Canvas credentials come from `CANVAS_API_URL` and
    /// `CANVAS_API_TOKEN`; server and transport settings use the `MCP_`
    /// prefix (e.g. `MCP_SERVER_NAME`, `MCP_TRANSPORT`).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(base_url) = std::env::var("CANVAS_API_URL") {
            config.canvas.base_url = base_url;
        } else {
            warn!("CANVAS_API_URL not set - API requests will fail until it is configured");
        }

        if let Ok(token) = std::env::var("CANVAS_API_TOKEN") {
            config.canvas.api_token = token;
            info!("Canvas API token loaded from environment");
        } else {
            warn!(
                "CANVAS_API_TOKEN not set - the server will start, but every \
                 Canvas API call will fail until a token is provided"
            );
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_canvas_config_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("CANVAS_API_URL", "https://canvas.test/api/v1");
            std::env::set_var("CANVAS_API_TOKEN", "token-12345");
        }
        let config = Config::from_env();
        assert_eq!(config.canvas.base_url, "https://canvas.test/api/v1");
        assert_eq!(config.canvas.api_token, "token-12345");
        unsafe {
            std::env::remove_var("CANVAS_API_URL");
            std::env::remove_var("CANVAS_API_TOKEN");
        }
    }

    #[test]
    fn test_canvas_config_defaults_empty() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("CANVAS_API_URL");
            std::env::remove_var("CANVAS_API_TOKEN");
        }
        let config = Config::from_env();
        assert!(config.canvas.base_url.is_empty());
        assert!(config.canvas.api_token.is_empty());
    }

    #[test]
    fn test_canvas_token_redacted_in_debug() {
        let canvas = CanvasConfig {
            base_url: "https://canvas.test/api/v1".to_string(),
            api_token: "super_secret_token".to_string(),
        };
        let debug_str = format!("{:?}", canvas);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_token"));
    }

    #[test]
    fn test_server_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "canvas-mcp-server");
        assert_eq!(config.logging.level, "info");
    }
}
