//! `tsh resolve --format json`: a single node record.

use std::fmt::Write as _;

use serde_json::{Map, Value};

use super::nodes::NodeRecord;
use super::{join_labels, FormatError};

pub const NO_RESULT: &str = "No resolution result";
pub const INVALID_STRUCTURE: &str = "Invalid resolution result structure";

pub fn render_resolve(node: &NodeRecord) -> String {
    let mut out = format!("Host resolution for: {}\n", node.hostname);
    if let Some(addr) = node.distinct_addr() {
        let _ = writeln!(out, "Address: {addr}");
    }
    if !node.id.is_empty() {
        let _ = writeln!(out, "Node ID: {}", node.id);
    }
    if !node.labels.is_empty() {
        let _ = writeln!(out, "Labels: {}", join_labels(&node.labels));
    }
    out
}

/// Blank input renders [`NO_RESULT`]; `null` or a record missing `metadata`
/// or `spec` renders [`INVALID_STRUCTURE`].
pub fn format_resolve(raw: &str) -> Result<String, FormatError> {
    if raw.trim().is_empty() {
        return Ok(NO_RESULT.to_string());
    }
    let record: Option<Map<String, Value>> = serde_json::from_str(raw)?;
    let node = record.and_then(|map| NodeRecord::from_value(&Value::Object(map)));
    Ok(node.map_or_else(|| INVALID_STRUCTURE.to_string(), |n| render_resolve(&n)))
}
