//! Shared fixtures for manifest pipeline tests
//!
//! - stub mergers standing in for the MachineConfig merge capability
//! - builders for MachineConfig and other manifest text

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use ztp_siteconfig::{BoxError, ConfigFragment, ConfigMerger, MergeContext};

/// Unions kernel arguments and extensions, later fragments win for
/// scalars; the kernel type must agree across fragments.
pub struct UnionMerger;

impl ConfigMerger for UnionMerger {
    fn merge(
        &self,
        fragments: &[ConfigFragment],
        context: &MergeContext,
    ) -> Result<ConfigFragment, BoxError> {
        let mut merged = ConfigFragment::default();
        for fragment in fragments {
            let spec = &fragment.spec;
            if !spec.kernel_type.is_empty()
                && !merged.spec.kernel_type.is_empty()
                && spec.kernel_type != merged.spec.kernel_type
            {
                return Err(format!(
                    "conflicting kernel types {} and {}",
                    merged.spec.kernel_type, spec.kernel_type
                )
                .into());
            }
            if !spec.kernel_type.is_empty() {
                merged.spec.kernel_type = spec.kernel_type.clone();
            }
            for arg in &spec.kernel_arguments {
                if !merged.spec.kernel_arguments.contains(arg) {
                    merged.spec.kernel_arguments.push(arg.clone());
                }
            }
            for ext in &spec.extensions {
                if !merged.spec.extensions.contains(ext) {
                    merged.spec.extensions.push(ext.clone());
                }
            }
            merged.spec.fips |= spec.fips;
            if !spec.config.is_null() {
                merged.spec.config = spec.config.clone();
            }
        }
        if let Some(url) = &context.os_image_url {
            merged.spec.os_image_url = url.clone();
        }
        Ok(merged)
    }
}

/// Returns an empty fragment for every role
pub struct EmptyMerger;

impl ConfigMerger for EmptyMerger {
    fn merge(&self, _: &[ConfigFragment], _: &MergeContext) -> Result<ConfigFragment, BoxError> {
        Ok(ConfigFragment::default())
    }
}

/// MachineConfig manifest text
pub fn machine_config(name: &str, role: Option<&str>, kernel_args: &[&str]) -> String {
    let mut text = format!(
        "apiVersion: machineconfiguration.openshift.io/v1\nkind: MachineConfig\nmetadata:\n  name: {}\n",
        name
    );
    if let Some(role) = role {
        text.push_str(&format!(
            "  labels:\n    machineconfiguration.openshift.io/role: {}\n",
            role
        ));
    }
    text.push_str("spec:\n  config:\n    ignition:\n      version: 3.2.0\n");
    if !kernel_args.is_empty() {
        text.push_str("  kernelArguments:\n");
        for arg in kernel_args {
            text.push_str(&format!("  - {}\n", arg));
        }
    }
    text
}

pub fn config_map(name: &str) -> String {
    format!("apiVersion: v1\nkind: ConfigMap\nmetadata:\n  name: {}\ndata:\n  key: value\n", name)
}

pub fn documents(entries: &[(&str, String)]) -> BTreeMap<String, String> {
    entries
        .iter()
        .map(|(name, text)| (name.to_string(), text.clone()))
        .collect()
}

pub fn names(entries: &[&str]) -> BTreeSet<String> {
    entries.iter().map(|s| s.to_string()).collect()
}
