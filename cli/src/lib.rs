//! Library half of the `mcp-teleport` binary: settings overrides, runtime
//! wiring and the `tool` subcommands.
//!
//! Kept out of `main.rs` so the same paths can be tested without spawning the
//! binary.

mod runtime;
mod tool_cmd;

use thiserror::Error;

pub use runtime::{Overrides, Runtime};
pub use tool_cmd::{call_tool, list_tools, parse_call_args, show_tool, ToolShowFormat};

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config: {0}")]
    Config(#[from] config::LoadError),
    #[error("tool not found: {0}")]
    ToolNotFound(String),
    #[error("invalid --args: {0}")]
    InvalidArgs(String),
    #[error("render: {0}")]
    Render(String),
    #[error("serve: {0}")]
    Serve(#[from] serve::ServeError),
}
