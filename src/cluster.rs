//! Cluster specification consumed by warning rules and install overrides.
//!
//! Only the fields read by this crate are modelled; everything else in a
//! site definition is ignored on decode.

use serde::{Deserialize, Serialize};
use std::fmt;

/// CPU partitioning requested for a cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CpuPartitioningMode {
    #[default]
    None,
    AllNodes,
}

impl CpuPartitioningMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::AllNodes => "AllNodes",
        }
    }
}

impl fmt::Display for CpuPartitioningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One cluster of a site definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClusterSpec {
    pub cluster_name: String,

    /// Network plugin, e.g. `OVNKubernetes`
    pub network_type: String,

    /// User-supplied install config overrides, raw JSON text
    pub install_config_overrides: String,

    #[serde(rename = "cpuPartitioningMode")]
    pub cpu_partitioning: CpuPartitioningMode,

    /// Deprecated single search path for extra manifests
    pub extra_manifest_path: String,

    pub nodes: Vec<NodeSpec>,
}

/// One host of a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeSpec {
    pub host_name: String,

    /// Deprecated workload partitioning cpuset
    pub cpuset: String,
}

impl ClusterSpec {
    /// Decode a cluster from YAML (or JSON) text
    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
