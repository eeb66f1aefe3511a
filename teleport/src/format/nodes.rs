//! `tsh ls --format json`: SSH node listing.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde_json::Value;

use super::{join_labels, FormatError};

pub const NO_NODES: &str = "No SSH nodes found";

/// One node as shown to callers. Labels merge static `metadata.labels` with
/// dynamic `spec.cmd_labels.<key>.result`; the dynamic value wins on a clash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRecord {
    pub id: String,
    pub hostname: String,
    pub addr: String,
    pub labels: BTreeMap<String, String>,
}

/// Strings render bare; anything else as compact JSON.
pub(crate) fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn str_field(obj: &serde_json::Map<String, Value>, key: &str) -> String {
    obj.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

impl NodeRecord {
    /// `None` when the record lacks a `metadata` or `spec` object.
    pub fn from_value(node: &Value) -> Option<Self> {
        let metadata = node.get("metadata")?.as_object()?;
        let spec = node.get("spec")?.as_object()?;

        let mut labels: BTreeMap<String, String> = metadata
            .get("labels")
            .and_then(Value::as_object)
            .map(|m| m.iter().map(|(k, v)| (k.clone(), label_text(v))).collect())
            .unwrap_or_default();

        if let Some(cmd_labels) = spec.get("cmd_labels").and_then(Value::as_object) {
            for (key, label) in cmd_labels {
                if let Some(result) = label.get("result").and_then(Value::as_str) {
                    labels.insert(key.clone(), result.to_string());
                }
            }
        }

        Some(Self {
            id: str_field(metadata, "name"),
            hostname: str_field(spec, "hostname"),
            addr: str_field(spec, "addr"),
            labels,
        })
    }

    /// Address worth showing: non-empty and different from the hostname.
    pub fn distinct_addr(&self) -> Option<&str> {
        (!self.addr.is_empty() && self.addr != self.hostname).then_some(self.addr.as_str())
    }
}

/// Decodes the node array, skipping malformed entries. Order is kept.
pub fn parse_ssh_nodes(raw: &str) -> Result<Vec<NodeRecord>, FormatError> {
    let nodes: Vec<Value> = serde_json::from_str(raw)?;
    Ok(nodes.iter().filter_map(NodeRecord::from_value).collect())
}

pub fn render_ssh_nodes(nodes: &[NodeRecord]) -> String {
    if nodes.is_empty() {
        return NO_NODES.to_string();
    }
    let mut out = format!("Found {} SSH node(s):\n\n", nodes.len());
    for node in nodes {
        let _ = write!(out, "• {}", node.hostname);
        if let Some(addr) = node.distinct_addr() {
            let _ = write!(out, " ({addr})");
        }
        if !node.id.is_empty() {
            let _ = write!(out, " [{}]", node.id);
        }
        out.push('\n');
        if !node.labels.is_empty() {
            let _ = writeln!(out, "  Labels: {}", join_labels(&node.labels));
        }
        out.push('\n');
    }
    out
}

/// Blank input renders [`NO_NODES`].
pub fn format_ssh_nodes(raw: &str) -> Result<String, FormatError> {
    if raw.trim().is_empty() {
        return Ok(NO_NODES.to_string());
    }
    Ok(render_ssh_nodes(&parse_ssh_nodes(raw)?))
}
