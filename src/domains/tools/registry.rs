//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A static, ordered registry of all available tools
//! - Dispatch of tool calls by name
//! - Tool metadata for listing

use tracing::{info, warn};

use super::definitions::{CalculatorTool, GetTimeTool};
use super::{Parameters, ToolDescriptor, ToolError, ToolHandler, ToolResult};

// ============================================================================
// Tool Registry
// ============================================================================

/// A registered tool: its metadata and its handler.
#[derive(Debug, Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub handler: ToolHandler,
}

/// Tool registry - manages all available tools.
///
/// Built once at startup and never mutated. Lookups are linear; the set is
/// tiny and the declared order doubles as the listing order.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    /// Create the registry with every built-in tool, in declared order.
    pub fn new() -> Self {
        let tools = vec![
            RegisteredTool {
                descriptor: CalculatorTool::descriptor(),
                handler: CalculatorTool::execute,
            },
            RegisteredTool {
                descriptor: GetTimeTool::descriptor(),
                handler: GetTimeTool::execute,
            },
        ];
        info!("Registered {} tools", tools.len());
        Self { tools }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools
            .iter()
            .map(|t| t.descriptor.name.as_str())
            .collect()
    }

    /// Get all tool descriptors, in declared order.
    pub fn list_tools(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Look up a registered tool by name.
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.iter().find(|t| t.descriptor.name == name)
    }

    /// Dispatch a tool call to the matching handler.
    ///
    /// The handler's result is returned unchanged; only an unknown name is
    /// an error.
    pub fn call_tool(&self, name: &str, parameters: &Parameters) -> Result<ToolResult, ToolError> {
        match self.get(name) {
            Some(tool) => {
                info!("Executing tool: {}", name);
                Ok((tool.handler)(parameters))
            }
            None => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }

    /// Dispatch a tool call, folding an unknown name into a failure result.
    pub fn execute(&self, name: &str, parameters: &Parameters) -> ToolResult {
        self.call_tool(name, parameters)
            .unwrap_or_else(|e| ToolResult::failure(e.to_string()))
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
