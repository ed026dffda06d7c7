//! MCP Tool Server Library
//!
//! A small HTTP server exposing a fixed set of named tools (a calculator and
//! a clock) behind a JSON API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server and the HTTP transport
//! - **domains**: business logic organized by bounded contexts
//!   - **tools**: tool definitions, the registry and dispatch
//!
//! # Example
//!
//! ```rust,no_run
//! use tool_mcp_server::core::{Config, HttpTransport, McpServer};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let transport = HttpTransport::new(config.http.clone());
//!     transport.run(McpServer::new(config)).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use crate::core::{Config, Error, McpServer, Result};
