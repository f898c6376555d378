//! Per-role MachineConfig merging
//!
//! Every MachineConfig of a manifest set that is not excluded is grouped by
//! role, merged through the injected [`ConfigMerger`], stamped with the
//! pipeline identity, trimmed of empty fields, and written back as one
//! manifest per role named `<prefix>-<role>.<ext>`.

mod group;

pub use group::{group_by_role, RoleGroup, RoleGroups};

use std::collections::{BTreeMap, BTreeSet};
use tracing::{info, warn};
use ztp_document::Document;

use crate::config::PipelineConfig;
use crate::error::ManifestError;
use crate::fragment::{ConfigFragment, ConfigMerger, MergeContext};

/// Merges role-scoped MachineConfigs of a manifest set
pub struct ManifestMerger<M> {
    merger: M,
    config: PipelineConfig,
    context: MergeContext,
}

impl<M: ConfigMerger> ManifestMerger<M> {
    /// Create a merger using the default configuration
    pub fn new(merger: M) -> Self {
        Self {
            merger,
            config: PipelineConfig::default(),
            context: MergeContext::default(),
        }
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the controller inputs handed to every merge
    pub fn with_context(mut self, context: MergeContext) -> Self {
        self.context = context;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Replace every role's MachineConfigs in `documents` with one merged
    /// manifest.
    ///
    /// Excluded names and documents of other kinds are left untouched. A
    /// decode or projection failure returns before anything is removed. A
    /// failure while merging a role returns immediately; roles merged before
    /// it have already been written to `documents`.
    pub fn merge_manifests(
        &self,
        documents: &mut BTreeMap<String, String>,
        excluded: &BTreeSet<String>,
    ) -> Result<(), ManifestError> {
        let groups = group_by_role(documents, excluded, &self.config.merge)?;

        for group in groups.values() {
            for source in &group.sources {
                documents.remove(source);
            }
        }

        for (role, group) in &groups {
            let (file_name, text) = self.merge_role(role, &group.fragments)?;
            info!(
                role = %role,
                fragments = group.fragments.len(),
                manifest = %file_name,
                "merged role manifests"
            );
            documents.insert(file_name, text);
        }

        Ok(())
    }

    /// Merge one role and render it; returns the file name and text.
    fn merge_role(
        &self,
        role: &str,
        fragments: &[ConfigFragment],
    ) -> Result<(String, String), ManifestError> {
        let settings = &self.config.merge;

        let merged = self
            .merger
            .merge(fragments, &self.context)
            .map_err(|source| {
                warn!(role = %role, error = %source, "merge failed");
                ManifestError::MergeDelegation {
                    role: role.to_string(),
                    kind: settings.target_kind.clone(),
                    source,
                }
            })?;
        let merged = self.stamp_identity(merged, role);
        let name = merged.metadata.name.clone();

        let document = Document::from_typed(&merged)
            .map_err(|source| ManifestError::Encode {
                name: name.clone(),
                source,
            })?
            .trimmed()
            .ok_or_else(|| ManifestError::EmptyResult {
                role: role.to_string(),
                kind: settings.target_kind.clone(),
            })?;

        let text = document
            .encode(settings.output_format)
            .map_err(|source| ManifestError::Encode {
                name: name.clone(),
                source,
            })?;

        Ok((format!("{}.{}", name, settings.output_format.extension()), text))
    }

    /// Overwrite name, labels, annotations and type identity.
    fn stamp_identity(&self, mut merged: ConfigFragment, role: &str) -> ConfigFragment {
        let settings = &self.config.merge;
        let provenance = &self.config.provenance;

        merged.metadata.name = format!("{}-{}", settings.name_prefix, role);
        merged.metadata.labels = BTreeMap::from([(settings.role_label.clone(), role.to_string())]);
        merged.metadata.annotations =
            BTreeMap::from([(provenance.annotation.clone(), provenance.value.clone())]);
        merged.api_version = settings.target_api_version.clone();
        merged.kind = settings.target_kind.clone();
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use serde_json::json;
    use ztp_document::Format;

    /// Concatenates kernel arguments, keeps the first fragment otherwise
    struct KernelArgsMerger;

    impl ConfigMerger for KernelArgsMerger {
        fn merge(
            &self,
            fragments: &[ConfigFragment],
            _context: &MergeContext,
        ) -> Result<ConfigFragment, BoxError> {
            let mut merged = fragments.first().cloned().unwrap_or_default();
            merged.spec.kernel_arguments = fragments
                .iter()
                .flat_map(|f| f.spec.kernel_arguments.iter().cloned())
                .collect();
            Ok(merged)
        }
    }

    fn manifest(name: &str, role: &str, karg: &str) -> String {
        format!(
            "apiVersion: machineconfiguration.openshift.io/v1\nkind: MachineConfig\nmetadata:\n  name: {name}\n  labels:\n    machineconfiguration.openshift.io/role: {role}\nspec:\n  kernelArguments:\n  - {karg}\n"
        )
    }

    #[test]
    fn test_merged_document_is_trimmed_and_stamped() {
        let mut documents = BTreeMap::from([(
            "one.yaml".to_string(),
            manifest("one", "master", "nohz=on"),
        )]);

        ManifestMerger::new(KernelArgsMerger)
            .merge_manifests(&mut documents, &BTreeSet::new())
            .unwrap();

        let text = &documents["predefined-extra-manifests-master.yaml"];
        let document = Document::decode(text, Format::Yaml).unwrap();
        assert_eq!(
            serde_json::Value::from(document),
            json!({
                "apiVersion": "machineconfiguration.openshift.io/v1",
                "kind": "MachineConfig",
                "metadata": {
                    "name": "predefined-extra-manifests-master",
                    "labels": {"machineconfiguration.openshift.io/role": "master"},
                    "annotations": {"ran.openshift.io/ztp-gitops-generated": "{}"}
                },
                "spec": {
                    "kernelArguments": ["nohz=on"],
                    "fips": false
                }
            })
        );
    }

    #[test]
    fn test_json_output_format() {
        let mut config = PipelineConfig::default();
        config.merge.output_format = Format::Json;
        let mut documents = BTreeMap::from([(
            "one.yaml".to_string(),
            manifest("one", "worker", "a=b"),
        )]);

        ManifestMerger::new(KernelArgsMerger)
            .with_config(config)
            .merge_manifests(&mut documents, &BTreeSet::new())
            .unwrap();

        let text = &documents["predefined-extra-manifests-worker.json"];
        let value: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(value["metadata"]["name"], "predefined-extra-manifests-worker");
    }

    #[test]
    fn test_context_reaches_merger() {
        let merger = |fragments: &[ConfigFragment],
                      context: &MergeContext|
         -> Result<ConfigFragment, BoxError> {
            let mut merged = fragments[0].clone();
            merged.spec.os_image_url = context.os_image_url.clone().unwrap_or_default();
            Ok(merged)
        };
        let mut documents = BTreeMap::from([(
            "one.yaml".to_string(),
            manifest("one", "master", "x"),
        )]);

        ManifestMerger::new(merger)
            .with_context(MergeContext {
                os_image_url: Some("quay.io/rhcos@sha256:abc".to_string()),
            })
            .merge_manifests(&mut documents, &BTreeSet::new())
            .unwrap();

        let document = Document::decode(
            &documents["predefined-extra-manifests-master.yaml"],
            Format::Yaml,
        )
        .unwrap();
        assert_eq!(
            document.get("spec").unwrap()["osImageURL"],
            "quay.io/rhcos@sha256:abc"
        );
    }
}
