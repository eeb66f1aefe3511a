//! Response assembly: one [`Response`] per invocation, whatever happened.

use serde::Serialize;
use tracing::warn;

use crate::exec::ExecutionResult;
use crate::format::{format_kube_clusters, format_resolve, format_ssh_nodes, FormatError};
use crate::params::{ParameterSet, ValidationError};

/// What to do with a successful command's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// Output as is.
    Raw,
    SshNodes,
    /// Honors the `verbose` parameter.
    KubeClusters,
    Resolve,
    /// Prefixed with a completion line.
    FileTransfer,
    /// Banner naming the target cluster (or all clusters).
    KubeLogin,
}

/// Text segments plus an error flag, as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub content: Vec<String>,
    pub is_error: bool,
}

impl Response {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![text.into()],
            is_error: true,
        }
    }

    pub fn from_validation(err: &ValidationError) -> Self {
        Self::error(format!("Error: {err}"))
    }

    pub fn from_failure(result: &ExecutionResult) -> Self {
        Self::error(format!("Error: {}\n{}", result.error_message, result.output))
    }

    /// Failure or rendered success for `result`.
    pub fn from_result(result: &ExecutionResult, kind: OutputKind, params: &ParameterSet) -> Self {
        if !result.success {
            return Self::from_failure(result);
        }
        Self::text(render_success(&result.output, kind, params))
    }

    /// All segments joined with newlines.
    pub fn joined(&self) -> String {
        self.content.join("\n")
    }
}

fn parsed_or_raw(parsed: Result<String, FormatError>, output: &str) -> String {
    match parsed {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "structured output not recognized, returning raw text");
            output.to_string()
        }
    }
}

fn kube_login_banner(output: &str, params: &ParameterSet) -> String {
    let mut text = match params.str("kubeCluster") {
        Some(cluster) if !params.is_set("all") => {
            format!("Successfully logged in to Kubernetes cluster: {cluster}\n")
        }
        _ => "Successfully logged in to all accessible Kubernetes clusters.\n".to_string(),
    };
    text.push_str(
        "Your kubeconfig has been updated. You can now use kubectl to interact with the cluster(s).\n\n",
    );
    if !output.is_empty() {
        text.push_str("Command output:\n");
        text.push_str(output);
    }
    text
}

fn render_success(output: &str, kind: OutputKind, params: &ParameterSet) -> String {
    match kind {
        OutputKind::Raw => output.to_string(),
        OutputKind::SshNodes => parsed_or_raw(format_ssh_nodes(output), output),
        OutputKind::KubeClusters => {
            parsed_or_raw(format_kube_clusters(output, params.is_set("verbose")), output)
        }
        OutputKind::Resolve => parsed_or_raw(format_resolve(output), output),
        OutputKind::FileTransfer => format!("File transfer completed successfully\n{output}"),
        OutputKind::KubeLogin => kube_login_banner(output, params),
    }
}
