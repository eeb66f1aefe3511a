//! Stdio MCP transport for mcp-teleport.
//!
//! Reads one JSON-RPC 2.0 request per line from stdin and writes one response
//! per line to stdout. Handles `initialize`, `notifications/initialized`,
//! `ping`, `tools/list` and `tools/call`; everything else is `-32601`.
//!
//! **Public API**: [`run_stdio`], [`run_stdio_on`], [`AppState`].

mod app;
mod connection;
mod response;
mod tools;

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

pub use app::{AppState, DEFAULT_PROTOCOL_VERSION, SERVER_NAME};

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("stdio: {0}")]
    Io(#[from] std::io::Error),
    #[error("writer task: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Serves `state` over an arbitrary reader/writer pair. Used by tests with
/// `tokio::io::duplex`. Returns after EOF or shutdown once every pending reply
/// has been written.
pub async fn run_stdio_on<R, W>(reader: R, writer: W, state: Arc<AppState>) -> Result<(), ServeError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send + 'static,
{
    info!(
        tools = state.registry.len(),
        "{} {} serving MCP on stdio", state.server_name, state.server_version
    );
    let (tx, writer_task) = response::spawn_writer(writer);
    let read_result = connection::handle_connection(reader, tx, state).await;
    let write_result = writer_task.await?;
    read_result?;
    write_result?;
    info!("stdio session closed");
    Ok(())
}

/// Serves `state` on the process's stdin and stdout.
pub async fn run_stdio(state: Arc<AppState>) -> Result<(), ServeError> {
    run_stdio_on(tokio::io::stdin(), tokio::io::stdout(), state).await
}
