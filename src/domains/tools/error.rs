//! Tool-specific error types.

use thiserror::Error;

/// Errors that can occur while dispatching a tool call.
///
/// Computational failures inside a tool are not errors at this level: tools
/// report them as [`ToolResult::Failure`](super::ToolResult::Failure).
#[derive(Debug, Error)]
pub enum ToolError {
    /// The requested tool was not found.
    #[error("unknown tool: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}
