//! MCP Server implementation.
//!
//! The server owns the configuration and the tool registry and answers the
//! three questions the transport asks: who are you, what can you do, and
//! please do this.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

use super::config::Config;
use crate::domains::tools::{Parameters, ToolDescriptor, ToolError, ToolRegistry, ToolResult};

/// Server identity, as returned by `/mcp/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub protocol: String,
}

/// The main MCP server handler.
///
/// Cheap to clone: configuration and registry are shared read-only.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry of available tools.
    registry: Arc<ToolRegistry>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            registry: Arc::new(ToolRegistry::new()),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Server identity and protocol.
    pub fn info(&self) -> ServerInfo {
        let server = &self.config.server;
        ServerInfo {
            name: server.name.clone(),
            version: server.version.clone(),
            description: server.description.clone(),
            protocol: server.protocol.clone(),
        }
    }

    /// List all available tools.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.registry.list_tools()
    }

    /// Call a tool by name.
    ///
    /// Returns `Err` only for an unknown tool; failures inside a known tool
    /// come back as [`ToolResult::Failure`].
    #[instrument(skip(self, parameters))]
    pub fn call_tool(&self, name: &str, parameters: &Parameters) -> Result<ToolResult, ToolError> {
        self.registry.call_tool(name, parameters)
    }
}
