//! Typed MachineConfig projection and the injected merge capability.
//!
//! A [`ConfigFragment`] only lives for the duration of one merge: documents
//! are projected into it, handed to a [`ConfigMerger`], and the result is
//! serialized back into a generic document.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::error::BoxError;

/// Object metadata fields read or written by the merge path
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ObjectMeta {
    pub name: String,
    pub namespace: String,
    pub labels: BTreeMap<String, String>,
    pub annotations: BTreeMap<String, String>,
}

/// MachineConfig spec
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MachineConfigSpec {
    #[serde(rename = "osImageURL")]
    pub os_image_url: String,

    #[serde(rename = "baseOSExtensionsContainerImage")]
    pub base_os_extensions_container_image: String,

    /// Raw ignition config
    pub config: Value,

    pub kernel_arguments: Vec<String>,
    pub extensions: Vec<String>,
    pub fips: bool,
    pub kernel_type: String,
}

/// A single MachineConfig document in typed form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigFragment {
    pub api_version: String,
    pub kind: String,
    pub metadata: ObjectMeta,
    pub spec: MachineConfigSpec,
}

impl ConfigFragment {
    /// Role this fragment belongs to; empty when the label is missing.
    pub fn role(&self, role_label: &str) -> &str {
        self.metadata
            .labels
            .get(role_label)
            .map(String::as_str)
            .unwrap_or_default()
    }
}

/// Controller inputs available to a merge
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeContext {
    /// OS image published by the cluster version operator
    pub os_image_url: Option<String>,
}

/// Combines all fragments of one role into a single fragment.
///
/// Implementations must be deterministic for a given input; the pipeline
/// calls them once per role, including roles with a single fragment.
pub trait ConfigMerger {
    fn merge(
        &self,
        fragments: &[ConfigFragment],
        context: &MergeContext,
    ) -> Result<ConfigFragment, BoxError>;
}

impl<F> ConfigMerger for F
where
    F: Fn(&[ConfigFragment], &MergeContext) -> Result<ConfigFragment, BoxError>,
{
    fn merge(
        &self,
        fragments: &[ConfigFragment],
        context: &MergeContext,
    ) -> Result<ConfigFragment, BoxError> {
        self(fragments, context)
    }
}
