//! Clock tool definition.
//!
//! A tool that formats the current local wall-clock time with
//! strftime-style specifiers.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde_json::Value as JsonValue;
use std::fmt::Write;
use tracing::{debug, instrument, warn};

use crate::domains::tools::{Parameters, ParameterSchema, ToolDescriptor, ToolResult};

/// Format used when the caller does not supply one.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Tool Definition
// ============================================================================

/// Clock tool - reports the current time.
pub struct GetTimeTool;

impl GetTimeTool {
    /// Tool name as registered in the registry.
    pub const NAME: &'static str = "get_time";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Get the current local time, optionally formatted with a strftime pattern.";

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub fn execute(params: &Parameters) -> ToolResult {
        let format = match params.get("format") {
            None | Some(JsonValue::Null) => DEFAULT_TIME_FORMAT,
            Some(JsonValue::String(s)) => s.as_str(),
            Some(_) => {
                warn!("get_time called with a non-string format");
                return ToolResult::failure("failed to get time: format must be a string");
            }
        };

        match format_time(&Local::now(), format) {
            Ok(formatted) => {
                debug!("Formatted current time as '{}'", formatted);
                ToolResult::success(format!("current time: {}", formatted))
            }
            Err(e) => {
                warn!("Time formatting failed: {}", e);
                ToolResult::failure(format!("failed to get time: {}", e))
            }
        }
    }

    /// Create the descriptor for this tool (metadata).
    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor::new(Self::NAME, Self::DESCRIPTION).with_parameter(
            "format",
            ParameterSchema::string("strftime pattern, defaults to %Y-%m-%d %H:%M:%S", false),
        )
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Format `time` with a strftime pattern, rejecting unknown specifiers.
pub fn format_time(time: &DateTime<Local>, format: &str) -> Result<String, String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(format!("invalid format string '{}'", format));
    }

    let mut formatted = String::new();
    write!(formatted, "{}", time.format_with_items(items.iter()))
        .map_err(|_| format!("cannot render format string '{}'", format))?;
    Ok(formatted)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn params(value: JsonValue) -> Parameters {
        value.as_object().cloned().unwrap_or_default()
    }

    fn fixed_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
    }

    fn is_default_shape(s: &str) -> bool {
        let bytes = s.as_bytes();
        bytes.len() == 19
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                10 => *b == b' ',
                13 | 16 => *b == b':',
                _ => b.is_ascii_digit(),
            })
    }

    #[test]
    fn test_format_time_default() {
        assert_eq!(
            format_time(&fixed_time(), DEFAULT_TIME_FORMAT).unwrap(),
            "2024-03-09 14:05:07"
        );
    }

    #[test]
    fn test_format_time_custom() {
        assert_eq!(format_time(&fixed_time(), "%H:%M").unwrap(), "14:05");
        assert_eq!(format_time(&fixed_time(), "%d/%m/%Y").unwrap(), "09/03/2024");
        assert_eq!(format_time(&fixed_time(), "").unwrap(), "");
    }

    #[test]
    fn test_format_time_invalid() {
        assert!(format_time(&fixed_time(), "%Q").is_err());
        assert!(format_time(&fixed_time(), "%Y-%").is_err());
    }

    #[test]
    fn test_get_time_default_shape() {
        let result = GetTimeTool::execute(&Parameters::new());
        let content = result.content().unwrap();
        let formatted = content.strip_prefix("current time: ").unwrap();
        assert!(is_default_shape(formatted), "unexpected shape: {}", formatted);
    }

    #[test]
    fn test_get_time_null_format_uses_default() {
        let result = GetTimeTool::execute(&params(json!({ "format": null })));
        let formatted = result.content().unwrap().strip_prefix("current time: ").unwrap();
        assert!(is_default_shape(formatted));
    }

    #[test]
    fn test_get_time_custom_format() {
        let result = GetTimeTool::execute(&params(json!({ "format": "%Y" })));
        let formatted = result.content().unwrap().strip_prefix("current time: ").unwrap();
        assert_eq!(formatted.len(), 4);
        assert!(formatted.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_get_time_invalid_format() {
        let result = GetTimeTool::execute(&params(json!({ "format": "%Q" })));
        assert!(result.error().unwrap().starts_with("failed to get time: "));

        let result = GetTimeTool::execute(&params(json!({ "format": 42 })));
        assert_eq!(
            result.error(),
            Some("failed to get time: format must be a string")
        );
    }
}
