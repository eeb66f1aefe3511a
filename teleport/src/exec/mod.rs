//! Command execution: run a [`CommandSpec`] against `tsh`, or describe it.
//!
//! [`CommandExecutor`] is the seam between the pipeline and the operating
//! system. [`TshExecutor`] spawns the real binary; [`MockExecutor`] records
//! calls for tests. Every failure comes back as an [`ExecutionResult`] with
//! `success == false`; nothing here returns `Err` or panics.

mod classify;
mod mock;
mod tsh;

pub use classify::{classify, RawOutcome, Termination};
pub use mock::MockExecutor;
pub use tsh::{TshExecutor, DEFAULT_BINARY, DEFAULT_TIMEOUT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::args::CommandSpec;

/// Whether a command is really run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Never spawns; reports what would have run.
    DryRun,
    Live,
}

impl ExecutionMode {
    pub fn from_dry_run(dry_run: bool) -> Self {
        if dry_run {
            Self::DryRun
        } else {
            Self::Live
        }
    }
}

/// Outcome of one invocation. `success` is false whenever `status_code != 0`
/// or the command timed out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub success: bool,
    /// Combined stdout and stderr, in arrival order.
    pub output: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error_message: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub status_code: i32,
}

fn is_zero(code: &i32) -> bool {
    *code == 0
}

impl ExecutionResult {
    pub fn ok(output: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            error_message: String::new(),
            status_code: 0,
        }
    }

    pub fn failed(error_message: impl Into<String>, output: impl Into<String>, status_code: i32) -> Self {
        Self {
            success: false,
            output: output.into(),
            error_message: error_message.into(),
            status_code,
        }
    }

    /// The synthesized dry-run result for `spec` run through `binary`.
    pub fn dry_run(spec: &CommandSpec, binary: &str) -> Self {
        Self::ok(format!("DRY RUN: Would execute: {}", spec.command_line(binary)))
    }
}

/// Runs built commands. One call spawns at most one process and never retries.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    async fn execute(&self, spec: &CommandSpec, mode: ExecutionMode) -> ExecutionResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_description_names_the_full_command() {
        let spec = CommandSpec::new("kube ls", vec!["--format".into(), "json".into()]);
        let result = ExecutionResult::dry_run(&spec, "tsh");
        assert!(result.success);
        assert_eq!(result.status_code, 0);
        assert_eq!(result.output, "DRY RUN: Would execute: tsh kube ls --format json");
    }

    #[test]
    fn serializes_camel_case_and_skips_empty_fields() {
        let value = serde_json::to_value(ExecutionResult::ok("hi")).unwrap();
        assert_eq!(value, serde_json::json!({"success": true, "output": "hi"}));

        let value = serde_json::to_value(ExecutionResult::failed("exit status 2", "", 2)).unwrap();
        assert_eq!(value["errorMessage"], "exit status 2");
        assert_eq!(value["statusCode"], 2);
    }

    #[test]
    fn mode_from_flag() {
        assert_eq!(ExecutionMode::from_dry_run(true), ExecutionMode::DryRun);
        assert_eq!(ExecutionMode::from_dry_run(false), ExecutionMode::Live);
    }
}
