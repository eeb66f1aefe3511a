//! Mock executor for tests and `tool call` demos without `tsh` installed.

use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;

use super::{CommandExecutor, ExecutionMode, ExecutionResult};
use crate::args::CommandSpec;

/// Records every command it is asked to run and answers with a canned result.
///
/// Dry-run calls still get the real dry-run description, so pipeline tests can
/// assert on the exact command line. Live calls return the configured result.
pub struct MockExecutor {
    result: ExecutionResult,
    calls: Mutex<Vec<(CommandSpec, ExecutionMode)>>,
}

impl MockExecutor {
    pub fn new(result: ExecutionResult) -> Self {
        Self {
            result,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Live calls succeed with `output`.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self::new(ExecutionResult::ok(output))
    }

    /// Live calls fail as if `tsh` exited with `status_code`.
    pub fn with_failure(
        error_message: impl Into<String>,
        output: impl Into<String>,
        status_code: i32,
    ) -> Self {
        Self::new(ExecutionResult::failed(error_message, output, status_code))
    }

    /// Snapshot of recorded calls, oldest first.
    pub fn calls(&self) -> Vec<(CommandSpec, ExecutionMode)> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The most recent command, if any.
    pub fn last_command(&self) -> Option<CommandSpec> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .map(|(spec, _)| spec.clone())
    }
}

#[async_trait]
impl CommandExecutor for MockExecutor {
    async fn execute(&self, spec: &CommandSpec, mode: ExecutionMode) -> ExecutionResult {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((spec.clone(), mode));
        match mode {
            ExecutionMode::DryRun => ExecutionResult::dry_run(spec, super::DEFAULT_BINARY),
            ExecutionMode::Live => self.result.clone(),
        }
    }
}
