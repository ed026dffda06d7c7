//! Calculator tool definition.
//!
//! Evaluates arithmetic expressions with a dedicated tokenizer and
//! recursive-descent parser. Only numbers, arithmetic and comparison
//! operators, parentheses and the allow-listed names `abs`, `round`, `pow`,
//! `sqrt`, `sin`, `cos`, `pi` and `e` are accepted.

mod builtins;
mod error;
mod eval;
mod lexer;
mod parser;
mod value;

pub use error::CalcError;
pub use eval::{MAX_EXPRESSION_LEN, evaluate_str};
pub use parser::MAX_DEPTH;
pub use value::Value;

use serde_json::Value as JsonValue;
use tracing::{debug, instrument, warn};

use crate::domains::tools::{Parameters, ParameterSchema, ToolDescriptor, ToolResult};

// ============================================================================
// Tool Definition
// ============================================================================

/// Calculator tool - evaluates an arithmetic expression.
pub struct CalculatorTool;

impl CalculatorTool {
    /// Tool name as registered in the registry.
    pub const NAME: &'static str = "calculator";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Evaluate an arithmetic expression. Supports + - * / // % ** ^, comparisons, and abs, round, pow, sqrt, sin, cos, pi, e.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &Parameters) -> ToolResult {
        let expression = match params.get("expression") {
            None | Some(JsonValue::Null) => return missing_expression(),
            Some(JsonValue::String(s)) if s.is_empty() => return missing_expression(),
            Some(JsonValue::String(s)) => s,
            Some(_) => {
                warn!("Calculator called with a non-string expression");
                return ToolResult::failure("calculation error: expression must be a string");
            }
        };

        match evaluate_str(expression) {
            Ok(value) => {
                debug!("Evaluated '{}' = {}", expression, value);
                ToolResult::success(format!("result: {} = {}", expression, value))
            }
            Err(e) => {
                warn!("Calculation failed for '{}': {}", expression, e);
                ToolResult::failure(format!("calculation error: {}", e))
            }
        }
    }

    /// Create the descriptor for this tool (metadata).
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION).with_parameter(
            "expression",
            ParameterSchema::string("Arithmetic expression, e.g. 2 * (3 + 4)", true),
        )
    }
}

fn missing_expression() -> ToolResult {
    warn!("Calculator called without an expression");
    ToolResult::failure("missing expression parameter")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: JsonValue) -> Parameters {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_calculator_success() {
        let result = CalculatorTool::execute(&params(json!({ "expression": "2+2" })));
        assert_eq!(result, ToolResult::success("result: 2+2 = 4"));
    }

    #[test]
    fn test_calculator_sqrt() {
        let result = CalculatorTool::execute(&params(json!({ "expression": "sqrt(16)" })));
        assert!(result.is_success());
        assert!(result.content().unwrap().contains('4'));
    }

    #[test]
    fn test_calculator_echoes_expression_verbatim() {
        let result = CalculatorTool::execute(&params(json!({ "expression": " 1 +  1" })));
        assert_eq!(result.content(), Some("result:  1 +  1 = 2"));
    }

    #[test]
    fn test_calculator_missing_expression() {
        for args in [
            json!({}),
            json!({ "expression": "" }),
            json!({ "expression": null }),
        ] {
            let result = CalculatorTool::execute(&params(args));
            assert_eq!(result, ToolResult::failure("missing expression parameter"));
        }
    }

    #[test]
    fn test_calculator_non_string_expression() {
        let result = CalculatorTool::execute(&params(json!({ "expression": 5 })));
        assert_eq!(
            result.error(),
            Some("calculation error: expression must be a string")
        );
    }

    #[test]
    fn test_calculator_errors_are_prefixed() {
        let result = CalculatorTool::execute(&params(json!({ "expression": "1/0" })));
        assert_eq!(result.error(), Some("calculation error: division by zero"));

        let result = CalculatorTool::execute(&params(json!({ "expression": "sqrt(-4)" })));
        assert_eq!(result.error(), Some("calculation error: math domain error"));
    }

    #[test]
    fn test_calculator_rejects_injection() {
        let result =
            CalculatorTool::execute(&params(json!({ "expression": "__import__('os')" })));
        assert!(!result.is_success());
        assert!(result.error().unwrap().starts_with("calculation error: "));
    }

    #[test]
    fn test_descriptor() {
        let descriptor = CalculatorTool::descriptor();
        assert_eq!(descriptor.name, "calculator");
        assert!(descriptor.parameters["expression"].required);
    }
}
