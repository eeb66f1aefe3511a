//! Logging initialization: logs go to stderr only.
//!
//! Stdout carries the stdio transport (or the `tool` command output), so no
//! log line may ever reach it.
//!
//! - **RUST_LOG**: filter, e.g. `teleport=debug,serve=info`. When unset: `info`,
//!   or `debug` with `--debug`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

pub fn init(debug: bool) -> Result<(), Box<dyn std::error::Error>> {
    let default = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_filter(filter);
    tracing_subscriber::registry().with(stderr_layer).try_init()?;
    Ok(())
}
