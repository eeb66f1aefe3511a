//! normalize → build → execute → classify → format → respond.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::args::{build_args, CommandSpec};
use crate::context::ServerConfig;
use crate::exec::{CommandExecutor, ExecutionMode, DEFAULT_BINARY};
use crate::operation::Operation;
use crate::params::{normalize, ParameterSet};
use crate::response::Response;

/// Builds the command `op` would run for already-validated `params`.
pub fn build_command(op: Operation, params: &ParameterSet) -> CommandSpec {
    CommandSpec::new(op.subcommand(), build_args(params, op.arg_rules()))
}

/// Runs one invocation end to end. Never fails: every outcome is a [`Response`].
pub async fn invoke(
    op: Operation,
    raw: Option<&Value>,
    config: &ServerConfig,
    executor: &dyn CommandExecutor,
) -> Response {
    let params = match normalize(raw, op.validation_rules()) {
        Ok(params) => params,
        Err(e) => {
            warn!(tool = %op, error = %e, fields = ?e.fields(), "invalid parameters");
            return Response::from_validation(&e);
        }
    };

    let spec = build_command(op, &params);
    let command = spec.command_line(DEFAULT_BINARY);
    if config.debug {
        info!(tool = %op, dry_run = config.dry_run, %command, "executing");
    } else {
        debug!(tool = %op, dry_run = config.dry_run, %command, "executing");
    }

    let result = executor
        .execute(&spec, ExecutionMode::from_dry_run(config.dry_run))
        .await;
    Response::from_result(&result, op.output(), &params)
}
