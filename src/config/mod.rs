//! Pipeline configuration
//!
//! Configuration is built from layers merged over the built-in defaults:
//! 1. Built-in defaults (the fixed site generator names)
//! 2. Any number of caller-supplied layers (TOML text or JSON values)
//!
//! The pipeline never reads files itself; callers pass text they loaded.

mod defaults;
mod merge;

pub use defaults::BuiltinDefaults;
pub use merge::{deep_merge, merge_layers};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ztp_document::Format;

use crate::constants::{
    MACHINE_CONFIG_API_VERSION, MACHINE_CONFIG_KIND, MACHINE_CONFIG_ROLE_LABEL,
    MERGED_NAME_PREFIX, ZTP_ANNOTATION, ZTP_ANNOTATION_VALUE, ZTP_WARNING_ANNOTATION,
};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Settings of the per-role merge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeSettings {
    /// Kind of the documents grouped and merged
    pub target_kind: String,
    /// API version stamped onto merged documents
    pub target_api_version: String,
    /// Label holding the role of a fragment
    pub role_label: String,
    /// Merged documents are named `<name_prefix>-<role>`
    pub name_prefix: String,
    /// Serialization of merged documents
    pub output_format: Format,
}

/// Provenance and warning annotation names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceSettings {
    pub annotation: String,
    pub value: String,
    /// Prefix of warning annotations, extended with the registry namespace
    pub warning_prefix: String,
}

/// Effective pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub merge: MergeSettings,
    pub provenance: ProvenanceSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            merge: MergeSettings {
                target_kind: MACHINE_CONFIG_KIND.to_string(),
                target_api_version: MACHINE_CONFIG_API_VERSION.to_string(),
                role_label: MACHINE_CONFIG_ROLE_LABEL.to_string(),
                name_prefix: MERGED_NAME_PREFIX.to_string(),
                output_format: Format::Yaml,
            },
            provenance: ProvenanceSettings {
                annotation: ZTP_ANNOTATION.to_string(),
                value: ZTP_ANNOTATION_VALUE.to_string(),
                warning_prefix: ZTP_WARNING_ANNOTATION.to_string(),
            },
        }
    }
}

impl PipelineConfig {
    /// Merge layers over the built-in defaults, then validate.
    pub fn from_layers(layers: impl IntoIterator<Item = Value>) -> Result<Self, ConfigError> {
        let merged = merge_layers(BuiltinDefaults::to_value(), layers);
        let config = Self::from_value(merged)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse one TOML layer over the built-in defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let toml_value: toml::Value = toml::from_str(text)
            .map_err(|e| ConfigError::Parse(format!("TOML parse error: {}", e)))?;
        Self::from_layers([toml_to_json(toml_value)])
    }

    fn from_value(value: Value) -> Result<Self, ConfigError> {
        serde_json::from_value(value).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("merge.target_kind", &self.merge.target_kind),
            ("merge.role_label", &self.merge.role_label),
            ("merge.name_prefix", &self.merge.name_prefix),
            ("provenance.annotation", &self.provenance.annotation),
        ];
        for (path, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{} must not be empty", path)));
            }
        }
        Ok(())
    }
}

fn toml_to_json(toml: toml::Value) -> Value {
    match toml {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::from(i),
        toml::Value::Float(f) => Value::from(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, val)| (key, toml_to_json(val)))
                .collect(),
        ),
    }
}
