//! Transport layer for the MCP server.
//!
//! The server speaks plain JSON over HTTP. The transport owns the listener,
//! the route table and the middleware stack, and delegates every request to
//! the [`McpServer`](crate::core::McpServer).

mod config;
mod error;
pub mod http;

pub use config::HttpConfig;
pub use error::TransportError;
pub use http::{HttpTransport, build_router};
