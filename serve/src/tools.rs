//! Handle `tools/list` and `tools/call`.

use serde::Deserialize;
use serde_json::{json, Value};
use teleport::{ToolCallContent, ToolRegistry};

use super::response::{JsonRpcError, INVALID_PARAMS};

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

pub(crate) fn handle_tools_list(registry: &ToolRegistry) -> Value {
    json!({ "tools": registry.list() })
}

/// MCP `tools/call` result: one text item per content segment.
pub(crate) fn call_result(content: ToolCallContent) -> Value {
    let items: Vec<Value> = content
        .content
        .into_iter()
        .map(|text| json!({"type": "text", "text": text}))
        .collect();
    json!({ "content": items, "isError": content.is_error })
}

pub(crate) async fn handle_tools_call(
    registry: &ToolRegistry,
    params: Option<Value>,
) -> Result<Value, JsonRpcError> {
    let params: ToolCallParams = serde_json::from_value(params.unwrap_or(Value::Null))
        .map_err(|e| JsonRpcError::new(INVALID_PARAMS, format!("invalid tool params: {}", e)))?;
    tracing::debug!(tool = %params.name, "tools/call");
    match registry.call(&params.name, params.arguments).await {
        Ok(content) => Ok(call_result(content)),
        Err(e) => {
            tracing::warn!("tools/call {} rejected: {}", params.name, e);
            Err(JsonRpcError::new(INVALID_PARAMS, e.to_string()))
        }
    }
}
