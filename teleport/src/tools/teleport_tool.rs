//! One [`Tool`] per [`Operation`], all backed by the same pipeline.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::context::ServerContext;
use crate::exec::CommandExecutor;
use crate::operation::Operation;
use crate::pipeline;
use crate::tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
use crate::tools::{schema, Tool, ToolRegistry};

/// Exposes one operation as an MCP tool.
///
/// Reads a [`ServerConfig`](crate::context::ServerConfig) snapshot per call,
/// so runtime toggles apply to the next invocation, never to one in flight.
pub struct TeleportTool {
    operation: Operation,
    context: Arc<ServerContext>,
    executor: Arc<dyn CommandExecutor>,
}

impl TeleportTool {
    pub fn new(
        operation: Operation,
        context: Arc<ServerContext>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            operation,
            context,
            executor,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }
}

#[async_trait]
impl Tool for TeleportTool {
    fn name(&self) -> &str {
        self.operation.tool_name()
    }

    fn spec(&self) -> ToolSpec {
        ToolSpec {
            name: self.operation.tool_name().to_string(),
            description: Some(self.operation.description().to_string()),
            input_schema: schema::input_schema(self.operation),
        }
    }

    async fn call(&self, args: Value) -> Result<ToolCallContent, ToolSourceError> {
        let config = self.context.snapshot();
        let raw = (!args.is_null()).then_some(&args);
        let response = pipeline::invoke(self.operation, raw, &config, self.executor.as_ref()).await;
        Ok(response.into())
    }
}

/// Registers a tool for every operation, sharing `context` and `executor`.
pub fn register_teleport_tools(
    registry: &mut ToolRegistry,
    context: Arc<ServerContext>,
    executor: Arc<dyn CommandExecutor>,
) {
    for op in Operation::ALL {
        registry.register(Box::new(TeleportTool::new(
            op,
            context.clone(),
            executor.clone(),
        )));
    }
}
