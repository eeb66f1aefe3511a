//! Decoders and renderers for `tsh --format json` output.
//!
//! Each parser turns raw JSON into records and then into stable text. Blank
//! input is "nothing found", never an error. A [`FormatError`] means the caller
//! should fall back to the raw output.

pub mod kube;
pub mod nodes;
pub mod resolve;

use std::collections::BTreeMap;
use std::fmt::Display;

use thiserror::Error;

pub use kube::{format_kube_clusters, KubeCluster};
pub use nodes::{format_ssh_nodes, NodeRecord};
pub use resolve::format_resolve;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("failed to parse JSON output: {0}")]
    Decode(#[from] serde_json::Error),
}

/// `k1=v1, k2=v2` in key order.
pub(crate) fn join_labels<V: Display>(labels: &BTreeMap<String, V>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}
