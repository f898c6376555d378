//! Install config override merging
//!
//! The AgentClusterInstall install-config-overrides annotation combines a
//! derived network object with the user's override document:
//! - no overrides: the network object alone
//! - overrides with a `networking` key: merged field by field under that key,
//!   derived values winning
//! - overrides without it: the two objects are spliced textually, keeping
//!   the user's formatting and key order

use serde_json::{Map, Value};

use crate::cluster::{ClusterSpec, CpuPartitioningMode};
use crate::constants::{CPU_PARTITIONING_KEY, NETWORKING_KEY};

/// Errors for override merging
#[derive(Debug, thiserror::Error)]
pub enum OverrideError {
    #[error("invalid JSON in {context}: {reason}")]
    InvalidJson {
        context: &'static str,
        reason: String,
    },

    #[error("could not encode {context}: {source}")]
    Encode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Build the install config override annotation for `network_type`.
pub fn build_network_annotation(
    network_type: &str,
    overrides: &str,
) -> Result<String, OverrideError> {
    let mut networking = Map::new();
    networking.insert("networkType".to_string(), Value::String(network_type.to_string()));
    let mut network = Map::new();
    network.insert(NETWORKING_KEY.to_string(), Value::Object(networking));

    let network_text =
        serde_json::to_string(&network).map_err(|source| OverrideError::Encode {
            context: "network annotation",
            source,
        })?;

    let overrides = overrides.trim();
    if overrides.is_empty() {
        return Ok(network_text);
    }

    let override_values = parse_object(overrides, "installConfigOverrides")?;
    if override_values.contains_key(NETWORKING_KEY) {
        return merge_at_key(&network_text, overrides, NETWORKING_KEY);
    }
    if override_values.is_empty() {
        return Ok(network_text);
    }

    let head = network_text.strip_suffix('}').unwrap_or(&network_text);
    let tail = overrides.strip_prefix('{').unwrap_or(overrides);
    let spliced = format!("{},{}", head, tail);
    serde_json::from_str::<Value>(&spliced).map_err(|e| OverrideError::InvalidJson {
        context: "spliced install config overrides",
        reason: e.to_string(),
    })?;

    Ok(spliced)
}

/// Merge `a[key]` into `b[key]` field by field, `a` winning, and return the
/// whole of `b`. Other top-level fields of `a` are ignored.
pub fn merge_at_key(a: &str, b: &str, key: &str) -> Result<String, OverrideError> {
    let a = parse_object(a, "merge source")?;
    let mut b = parse_object(b, "merge target")?;

    let mut merged = Map::new();
    if let Some(value) = b.get(key) {
        merged.extend(object_at(value, "merge target key")?.clone());
    }
    if let Some(value) = a.get(key) {
        merged.extend(object_at(value, "merge source key")?.clone());
    }
    b.insert(key.to_string(), Value::Object(merged));

    serde_json::to_string(&b).map_err(|source| OverrideError::Encode {
        context: "merged overrides",
        source,
    })
}

/// Force `cpuPartitioningMode: AllNodes` into the overrides when the cluster
/// asks for it; otherwise return the overrides untouched.
pub fn apply_workload_pinning_override(spec: &ClusterSpec) -> Result<String, OverrideError> {
    if spec.cpu_partitioning != CpuPartitioningMode::AllNodes {
        return Ok(spec.install_config_overrides.clone());
    }

    let mut values = if spec.install_config_overrides.trim().is_empty() {
        Map::new()
    } else {
        parse_object(&spec.install_config_overrides, "installConfigOverrides")?
    };
    values.insert(
        CPU_PARTITIONING_KEY.to_string(),
        Value::String(CpuPartitioningMode::AllNodes.as_str().to_string()),
    );

    serde_json::to_string(&values).map_err(|source| OverrideError::Encode {
        context: "installConfigOverrides",
        source,
    })
}

/// Full install config override annotation for a cluster: workload pinning
/// first, then the network object.
pub fn install_config_annotation(spec: &ClusterSpec) -> Result<String, OverrideError> {
    let overrides = apply_workload_pinning_override(spec)?;
    build_network_annotation(&spec.network_type, &overrides)
}

fn parse_object(text: &str, context: &'static str) -> Result<Map<String, Value>, OverrideError> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(OverrideError::InvalidJson {
            context,
            reason: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(OverrideError::InvalidJson {
            context,
            reason: e.to_string(),
        }),
    }
}

fn object_at<'a>(
    value: &'a Value,
    context: &'static str,
) -> Result<&'a Map<String, Value>, OverrideError> {
    value.as_object().ok_or_else(|| OverrideError::InvalidJson {
        context,
        reason: "expected a JSON object".to_string(),
    })
}
