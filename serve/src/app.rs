//! Shared state for one stdio session: the tool registry, the shutdown token
//! and the identity reported by `initialize`.

use std::sync::Arc;

use teleport::{register_teleport_tools, CommandExecutor, ServerContext, ToolRegistry};
use tokio_util::sync::CancellationToken;

/// Name reported in `serverInfo`.
pub const SERVER_NAME: &str = "mcp-teleport";

/// Protocol revision answered when the client does not send one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

/// State shared by the read loop and every spawned tool call.
pub struct AppState {
    pub(crate) registry: ToolRegistry,
    pub(crate) shutdown: CancellationToken,
    pub(crate) server_name: String,
    pub(crate) server_version: String,
}

impl AppState {
    /// Wraps an already populated registry. The loop stops when `shutdown` is cancelled.
    pub fn new(registry: ToolRegistry, shutdown: CancellationToken) -> Self {
        Self {
            registry,
            shutdown,
            server_name: SERVER_NAME.to_string(),
            server_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Registers every Teleport tool against `context` and `executor`, sharing
    /// the context's shutdown token.
    pub fn for_teleport(context: Arc<ServerContext>, executor: Arc<dyn CommandExecutor>) -> Self {
        let shutdown = context.shutdown_token();
        let mut registry = ToolRegistry::new();
        register_teleport_tools(&mut registry, context, executor);
        Self::new(registry, shutdown)
    }

    pub fn with_server_info(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.server_name = name.into();
        self.server_version = version.into();
        self
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}
