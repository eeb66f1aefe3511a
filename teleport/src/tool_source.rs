//! Tool-facing types shared with the transport: spec, call result, errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::response::Response;

/// Tool specification, aligned with an MCP `tools/list` result item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the arguments (MCP `inputSchema`).
    pub input_schema: Value,
}

/// Result of a single tool call; aligns with MCP `tools/call` content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallContent {
    /// One MCP text item per segment.
    pub content: Vec<String>,
    /// Tool-level failure. The call itself still succeeded at the protocol level.
    pub is_error: bool,
}

impl ToolCallContent {
    pub fn text(&self) -> String {
        self.content.join("\n")
    }
}

impl From<Response> for ToolCallContent {
    fn from(response: Response) -> Self {
        Self {
            content: response.content,
            is_error: response.is_error,
        }
    }
}

/// Errors from listing or calling tools. Command failures are not errors here;
/// they come back as [`ToolCallContent`] with `is_error` set.
#[derive(Debug, Error)]
pub enum ToolSourceError {
    #[error("tool not found: {0}")]
    NotFound(String),
    #[error("invalid arguments: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display of each ToolSourceError variant contains expected keywords.
    #[test]
    fn tool_source_error_display_all_variants() {
        let s = ToolSourceError::NotFound("x".into()).to_string();
        assert!(s.contains("not found"), "{}", s);
        let s = ToolSourceError::InvalidInput("bad".into()).to_string();
        assert!(s.contains("invalid"), "{}", s);
    }

    /// **Scenario**: ToolSpec serializes with MCP field names and omits a missing description.
    #[test]
    fn tool_spec_serializes_input_schema_camel_case() {
        let spec = ToolSpec {
            name: "teleport_status".into(),
            description: None,
            input_schema: serde_json::json!({"type": "object"}),
        };
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["inputSchema"]["type"], "object");
        assert!(value.get("description").is_none());
    }

    /// **Scenario**: A Response converts into call content without losing the error flag.
    #[test]
    fn response_converts_to_call_content() {
        let content: ToolCallContent = Response::error("Error: Host is required").into();
        assert!(content.is_error);
        assert_eq!(content.text(), "Error: Host is required");
    }
}
