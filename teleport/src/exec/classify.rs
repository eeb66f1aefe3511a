//! Maps a raw process outcome to an [`ExecutionResult`].

use std::time::Duration;

use super::ExecutionResult;

/// How the process (or the attempt to start it) ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// Process exited; `None` when it was killed by a signal.
    Exited(Option<i32>),
    /// Spawn or wait failed; the message is reported as is.
    Failed(String),
    TimedOut(Duration),
    /// Server shutdown interrupted the wait.
    Cancelled,
}

/// Everything observed about one live execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutcome {
    pub output: String,
    pub termination: Termination,
}

/// Status code used when the process gave none.
const UNKNOWN_STATUS: i32 = 1;

/// `30s` reads as `30`, `250ms` as `0.25`.
fn seconds(timeout: Duration) -> String {
    format!("{}", timeout.as_secs_f64())
}

/// Pure; captured output is kept on every path.
pub fn classify(raw: RawOutcome) -> ExecutionResult {
    let RawOutcome {
        output,
        termination,
    } = raw;
    match termination {
        Termination::Exited(Some(0)) => ExecutionResult::ok(output),
        Termination::Exited(Some(code)) => {
            ExecutionResult::failed(format!("exit status {code}"), output, code)
        }
        Termination::Exited(None) => {
            ExecutionResult::failed("process terminated by signal", output, UNKNOWN_STATUS)
        }
        Termination::Failed(message) => ExecutionResult::failed(message, output, UNKNOWN_STATUS),
        Termination::TimedOut(after) => ExecutionResult::failed(
            format!("Command timed out after {} seconds", seconds(after)),
            output,
            UNKNOWN_STATUS,
        ),
        Termination::Cancelled => ExecutionResult::failed(
            "Command cancelled: server is shutting down",
            output,
            UNKNOWN_STATUS,
        ),
    }
}
