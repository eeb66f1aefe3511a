//! `tsh kube ls --format json`: Kubernetes cluster listing.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Deserialize;
use serde_json::Value;

use super::nodes::label_text;
use super::{join_labels, FormatError};

pub const NO_CLUSTERS: &str = "No Kubernetes clusters found";
const VERBOSE_TIP: &str =
    "Tip: Use verbose=true to see detailed label information for each cluster.\n";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KubeCluster {
    #[serde(default)]
    pub kube_cluster_name: String,
    #[serde(default)]
    pub labels: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    pub selected: bool,
}

impl KubeCluster {
    fn label_count(&self) -> usize {
        self.labels.as_ref().map_or(0, BTreeMap::len)
    }
}

/// Decodes and sorts by cluster name.
pub fn parse_kube_clusters(raw: &str) -> Result<Vec<KubeCluster>, FormatError> {
    let mut clusters: Vec<KubeCluster> = serde_json::from_str(raw)?;
    clusters.sort_by(|a, b| a.kube_cluster_name.cmp(&b.kube_cluster_name));
    Ok(clusters)
}

/// Non-verbose output shows only a label count per cluster.
pub fn render_kube_clusters(clusters: &[KubeCluster], verbose: bool) -> String {
    if clusters.is_empty() {
        return NO_CLUSTERS.to_string();
    }
    let mut out = format!("Found {} Kubernetes cluster(s):\n\n", clusters.len());
    for cluster in clusters {
        let _ = write!(out, "• {}", cluster.kube_cluster_name);
        if cluster.selected {
            out.push_str(" (selected)");
        }
        out.push('\n');

        match &cluster.labels {
            Some(labels) if !labels.is_empty() && verbose => {
                let rendered: BTreeMap<String, String> = labels
                    .iter()
                    .map(|(k, v)| (k.clone(), label_text(v)))
                    .collect();
                let _ = writeln!(out, "  Labels: {}", join_labels(&rendered));
            }
            Some(_) if cluster.label_count() > 0 => {
                let _ = writeln!(
                    out,
                    "  Labels: {} available (use verbose=true to see details)",
                    cluster.label_count()
                );
            }
            _ => {}
        }
        out.push('\n');
    }
    if !verbose {
        out.push_str(VERBOSE_TIP);
    }
    out
}

/// Blank input renders [`NO_CLUSTERS`].
pub fn format_kube_clusters(raw: &str, verbose: bool) -> Result<String, FormatError> {
    if raw.trim().is_empty() {
        return Ok(NO_CLUSTERS.to_string());
    }
    Ok(render_kube_clusters(&parse_kube_clusters(raw)?, verbose))
}
