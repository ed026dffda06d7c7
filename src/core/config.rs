//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure populated from
//! environment variables (optionally via a `.env` file) on top of defaults.

use super::error::{Error, Result};
use super::transport::HttpConfig;
use serde::{Deserialize, Serialize};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// HTTP transport configuration.
    pub http: HttpConfig,
}

/// Server identification configuration, reported by `/mcp/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,

    /// Human readable description of the server.
    pub description: String,

    /// Protocol identifier advertised to clients.
    pub protocol: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "tool-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "MCP tool server exposing a calculator and a clock over HTTP".to_string(),
            protocol: "mcp/1.0".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
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
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_PORT`, `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    /// Fails only when a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(description) = std::env::var("MCP_SERVER_DESCRIPTION") {
            config.server.description = description;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(port) = std::env::var("MCP_PORT") {
            config.http.port = port
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("invalid MCP_PORT '{}': {}", port, e)))?;
        }

        if let Ok(host) = std::env::var("MCP_HOST") {
            config.http.host = host;
        }

        if let Ok(cors) = std::env::var("MCP_HTTP_CORS") {
            config.http.enable_cors = cors.to_lowercase() != "false" && cors != "0";
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.name, "tool-mcp-server");
        assert_eq!(config.server.protocol, "mcp/1.0");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.http.port, 5001);
        assert_eq!(config.http.host, "0.0.0.0");
        assert!(config.http.enable_cors);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_port_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_PORT", "6123");
        }
        let config = Config::from_env().unwrap();
        assert_eq!(config.http.port, 6123);
        unsafe {
            std::env::remove_var("MCP_PORT");
        }
    }

    #[test]
    fn test_invalid_port_is_config_error() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_PORT", "not-a-port");
        }
        let result = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_PORT");
        }
        match result {
            Err(Error::Config(msg)) => assert!(msg.contains("MCP_PORT")),
            other => panic!("Expected config error, got {:?}", other),
        }
    }

    #[test]
    fn test_cors_disabled_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_HTTP_CORS", "false");
        }
        let config = Config::from_env().unwrap();
        assert!(!config.http.enable_cors);
        unsafe {
            std::env::remove_var("MCP_HTTP_CORS");
        }
    }
}
