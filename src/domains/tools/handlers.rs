//! Tool handler types.
//!
//! Shapes shared by every tool: the invocation request coming off the wire,
//! the descriptor advertised by `/mcp/tools`, and the result record each
//! handler returns.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Caller-supplied tool parameters.
pub type Parameters = serde_json::Map<String, serde_json::Value>;

/// A tool handler. Handlers are pure functions and never panic on bad input;
/// every failure is reported through [`ToolResult::Failure`].
pub type ToolHandler = fn(&Parameters) -> ToolResult;

/// Input of a tool execution, as posted to `/mcp/execute`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationRequest {
    /// The name of the tool to execute.
    #[serde(default)]
    pub tool_name: Option<String>,

    /// The arguments to pass to the tool.
    #[serde(default)]
    pub parameters: Option<Parameters>,
}

impl InvocationRequest {
    /// Create a request for the given tool.
    pub fn new(tool_name: impl Into<String>, parameters: Parameters) -> Self {
        Self {
            tool_name: Some(tool_name.into()),
            parameters: Some(parameters),
        }
    }

    /// Split into tool name and parameters, substituting empty values for
    /// absent or `null` fields.
    pub fn into_parts(self) -> (String, Parameters) {
        (
            self.tool_name.unwrap_or_default(),
            self.parameters.unwrap_or_default(),
        )
    }
}

/// Schema of a single tool parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Value type ("string", "number", "boolean").
    #[serde(rename = "type")]
    pub kind: String,

    /// Human readable description.
    pub description: String,

    /// Whether the parameter must be supplied.
    pub required: bool,
}

impl ParameterSchema {
    /// A string parameter.
    pub fn string(description: impl Into<String>, required: bool) -> Self {
        Self {
            kind: "string".to_string(),
            description: description.into(),
            required,
        }
    }
}

/// Metadata describing a tool, as listed by `/mcp/tools`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique tool name.
    pub name: String,

    /// Human readable description.
    pub description: String,

    /// Parameter schemas keyed by parameter name.
    pub parameters: BTreeMap<String, ParameterSchema>,
}

impl ToolDescriptor {
    /// Create a descriptor without parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter schema.
    pub fn with_parameter(mut self, name: impl Into<String>, schema: ParameterSchema) -> Self {
        self.parameters.insert(name.into(), schema);
        self
    }
}

/// Outcome of a single tool invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "ToolOutput")]
pub enum ToolResult {
    /// The tool ran and produced content.
    Success { content: String },
    /// The tool could not produce a result.
    Failure { error: String },
}

impl ToolResult {
    /// Create a successful result.
    pub fn success(content: impl Into<String>) -> Self {
        Self::Success {
            content: content.into(),
        }
    }

    /// Create a failed result.
    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            error: error.into(),
        }
    }

    /// Whether this is a success.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Success content, if any.
    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Success { content } => Some(content),
            Self::Failure { .. } => None,
        }
    }

    /// Failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }
}

/// Wire shape of a [`ToolResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolOutput {
    /// Whether the execution was successful.
    pub success: bool,

    /// Content produced on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Error message on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<ToolResult> for ToolOutput {
    fn from(result: ToolResult) -> Self {
        match result {
            ToolResult::Success { content } => Self {
                success: true,
                content: Some(content),
                error: None,
            },
            ToolResult::Failure { error } => Self {
                success: false,
                content: None,
                error: Some(error),
            },
        }
    }
}
