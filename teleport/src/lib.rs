//! # teleport
//!
//! Tool-invocation pipeline that exposes Teleport's `tsh` CLI as MCP tools.
//!
//! One invocation flows through fixed stages:
//!
//! 1. [`params`]: untyped JSON arguments become a typed [`ParameterSet`] and
//!    per-operation [`ValidationRule`]s run.
//! 2. [`args`]: the common flag table plus the operation's [`ArgRule`]s build a
//!    [`CommandSpec`].
//! 3. [`exec`]: a [`CommandExecutor`] runs it (or describes it in dry-run mode)
//!    under a timeout and the shutdown token; [`exec::classify`] turns the raw
//!    outcome into an [`ExecutionResult`].
//! 4. [`format`]: JSON output of listing subcommands is rendered as text, with
//!    a fallback to the raw output.
//! 5. [`response`]: a [`Response`] is assembled.
//!
//! [`pipeline::invoke`] wires the stages together; [`tools::TeleportTool`]
//! exposes each [`Operation`] through the [`tools::Tool`] trait so a transport
//! can serve them from a [`tools::ToolRegistry`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use teleport::{register_teleport_tools, ServerConfig, ServerContext, ToolRegistry, TshExecutor};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let context = Arc::new(ServerContext::new(ServerConfig { dry_run: true, ..Default::default() }));
//! let executor = Arc::new(TshExecutor::new(context.shutdown_token()));
//! let mut registry = ToolRegistry::new();
//! register_teleport_tools(&mut registry, context, executor);
//! let out = registry
//!     .call("teleport_status", serde_json::json!({"proxy": "teleport.example.com"}))
//!     .await
//!     .unwrap();
//! assert_eq!(out.text(), "DRY RUN: Would execute: tsh status --proxy=teleport.example.com");
//! # }
//! ```

pub mod args;
pub mod context;
pub mod exec;
pub mod format;
pub mod operation;
pub mod params;
pub mod pipeline;
pub mod response;
pub mod tool_source;
pub mod tools;

pub use args::{build_args, ArgRule, CommandSpec, FlagMapping, COMMON_FLAGS};
pub use context::{ServerConfig, ServerContext};
pub use exec::{
    CommandExecutor, ExecutionMode, ExecutionResult, MockExecutor, TshExecutor, DEFAULT_BINARY,
    DEFAULT_TIMEOUT,
};
pub use format::FormatError;
pub use operation::Operation;
pub use params::{normalize, ParamValue, ParameterSet, ValidationError, ValidationRule};
pub use response::{OutputKind, Response};
pub use tool_source::{ToolCallContent, ToolSourceError, ToolSpec};
pub use tools::{register_teleport_tools, TeleportTool, Tool, ToolRegistry};
