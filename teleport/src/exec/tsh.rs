//! Live executor: spawns the `tsh` binary with `tokio::process`.

use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::classify::{classify, RawOutcome, Termination};
use super::{CommandExecutor, ExecutionMode, ExecutionResult};
use crate::args::CommandSpec;

pub const DEFAULT_BINARY: &str = "tsh";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long to wait for a killed child and its output pipes.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

type OutputBuffer = Arc<Mutex<Vec<u8>>>;

/// Runs commands against a real `tsh` (or any binary with the same CLI).
///
/// Each live call is bounded by `timeout` and by the shutdown token: whichever
/// fires first kills the child, and the partial output is still returned.
#[derive(Debug, Clone)]
pub struct TshExecutor {
    binary: String,
    timeout: Duration,
    shutdown: CancellationToken,
}

impl Default for TshExecutor {
    fn default() -> Self {
        Self::new(CancellationToken::new())
    }
}

impl TshExecutor {
    pub fn new(shutdown: CancellationToken) -> Self {
        Self {
            binary: DEFAULT_BINARY.to_string(),
            timeout: DEFAULT_TIMEOUT,
            shutdown,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn run(&self, spec: &CommandSpec) -> RawOutcome {
        let mut child = match Command::new(&self.binary)
            .args(spec.argv())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return RawOutcome {
                    output: String::new(),
                    termination: Termination::Failed(format!(
                        "failed to start {}: {}",
                        self.binary, e
                    )),
                }
            }
        };

        let buffer: OutputBuffer = Arc::new(Mutex::new(Vec::new()));
        let mut pumps = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            pumps.push(tokio::spawn(pump(stdout, buffer.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            pumps.push(tokio::spawn(pump(stderr, buffer.clone())));
        }

        let termination = tokio::select! {
            status = child.wait() => match status {
                Ok(status) => Termination::Exited(status.code()),
                Err(e) => Termination::Failed(format!("failed to wait for {}: {}", self.binary, e)),
            },
            _ = tokio::time::sleep(self.timeout) => Termination::TimedOut(self.timeout),
            _ = self.shutdown.cancelled() => Termination::Cancelled,
        };

        if matches!(
            termination,
            Termination::TimedOut(_) | Termination::Cancelled
        ) {
            warn!(command = %spec.command_line(&self.binary), ?termination, "killing tsh");
            if let Err(e) = child.start_kill() {
                debug!(error = %e, "kill failed, child may have exited");
            }
            let _ = tokio::time::timeout(DRAIN_GRACE, child.wait()).await;
        }

        drain(pumps).await;
        let bytes = std::mem::take(&mut *buffer.lock().unwrap_or_else(PoisonError::into_inner));
        RawOutcome {
            output: String::from_utf8_lossy(&bytes).into_owned(),
            termination,
        }
    }
}

/// Copies one pipe into the shared buffer until EOF or a read error.
async fn pump<R: AsyncRead + Unpin>(mut reader: R, sink: OutputBuffer) {
    let mut chunk = [0u8; 4096];
    loop {
        match reader.read(&mut chunk).await {
            Ok(0) | Err(_) => break,
            Ok(n) => sink
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(&chunk[..n]),
        }
    }
}

/// A grandchild can hold a pipe open after the child dies; give up after the grace.
async fn drain(pumps: Vec<JoinHandle<()>>) {
    for mut handle in pumps {
        if tokio::time::timeout(DRAIN_GRACE, &mut handle).await.is_err() {
            handle.abort();
        }
    }
}

#[async_trait]
impl CommandExecutor for TshExecutor {
    async fn execute(&self, spec: &CommandSpec, mode: ExecutionMode) -> ExecutionResult {
        match mode {
            ExecutionMode::DryRun => {
                let result = ExecutionResult::dry_run(spec, &self.binary);
                debug!(output = %result.output, "dry run");
                result
            }
            ExecutionMode::Live => {
                let result = classify(self.run(spec).await);
                if !result.success {
                    warn!(
                        command = %spec.command_line(&self.binary),
                        status = result.status_code,
                        error = %result.error_message,
                        "tsh command failed"
                    );
                }
                result
            }
        }
    }
}
