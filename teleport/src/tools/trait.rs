use async_trait::async_trait;

use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};

/// Represents a single tool that can be called over MCP.
///
/// Each tool has a unique name, a specification (description and JSON schema),
/// and implements the call logic. Tools are registered with
/// [`ToolRegistry`](crate::tools::ToolRegistry), which the transport queries
/// for `tools/list` and `tools/call`.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use serde_json::Value;
/// use teleport::tools::Tool;
/// use teleport::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
///
/// struct EchoTool;
///
/// #[async_trait]
/// impl Tool for EchoTool {
///     fn name(&self) -> &str {
///         "echo"
///     }
///
///     fn spec(&self) -> ToolSpec {
///         ToolSpec {
///             name: "echo".to_string(),
///             description: Some("Echo the arguments".to_string()),
///             input_schema: serde_json::json!({"type": "object"}),
///         }
///     }
///
///     async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
///         Ok(ToolCallContent {
///             content: vec![args.to_string()],
///             is_error: false,
///         })
///     }
/// }
/// ```
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the unique name of this tool.
    ///
    /// Must be unique across all tools registered in a ToolRegistry.
    fn name(&self) -> &str;

    /// Returns the specification for this tool.
    ///
    /// Spec fields are aligned with the MCP `tools/list` result.
    fn spec(&self) -> ToolSpec;

    /// Executes the tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`ToolSourceError`] only when the call cannot be attempted at
    /// all. A command that ran and failed is `Ok` with `is_error` set.
    async fn call(&self, args: serde_json::Value) -> Result<ToolCallContent, ToolSourceError>;
}
