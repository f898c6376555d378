//! Declarative deprecation rules
//!
//! Each rule names a kind, a field and a message, and fires when its
//! predicate holds for the cluster. Rules are evaluated in declaration order
//! and are additive.

use crate::cluster::ClusterSpec;
use crate::config::PipelineConfig;
use crate::constants::{DEPRECATION_WARNING_NAMESPACE, ZTP_WARNING_ANNOTATION};

use super::registry::AnnotationRegistry;

/// A warning emitted for `kind` whenever `applies` holds
#[derive(Clone, Copy)]
pub struct AnnotationRule {
    pub kind: &'static str,
    pub field: &'static str,
    pub message: &'static str,
    pub applies: fn(&ClusterSpec) -> bool,
}

/// Field deprecations reported on generated cluster documents
pub const DEPRECATION_RULES: &[AnnotationRule] = &[
    AnnotationRule {
        kind: "AgentClusterInstall",
        field: "cpuset",
        message: "cpuset will be deprecated after OCP 4.15, please use cpuPartitioningMode for OCP versions >= 4.14",
        applies: any_node_sets_cpuset,
    },
    AnnotationRule {
        kind: "ConfigMap",
        field: "extraManifestPath",
        message: "extraManifestPath will be deprecated after OCP 4.15, please use ExtraManifests.SearchPaths for OCP versions >= 4.14",
        applies: uses_extra_manifest_path,
    },
];

fn any_node_sets_cpuset(spec: &ClusterSpec) -> bool {
    spec.nodes.iter().any(|node| !node.cpuset.is_empty())
}

fn uses_extra_manifest_path(spec: &ClusterSpec) -> bool {
    !spec.extra_manifest_path.is_empty()
}

impl AnnotationRegistry {
    /// Add every rule of `rules` that applies to `spec`.
    pub fn populate(&self, rules: &[AnnotationRule], spec: &ClusterSpec) {
        for rule in rules.iter().filter(|rule| (rule.applies)(spec)) {
            self.add(rule.kind, rule.field, rule.message);
        }
    }
}

/// Registry of deprecation warnings for one cluster, under the default
/// warning prefix
pub fn build_deprecation_warnings(spec: &ClusterSpec) -> AnnotationRegistry {
    deprecation_registry(ZTP_WARNING_ANNOTATION, spec)
}

/// Registry of deprecation warnings keyed under the configured
/// `provenance.warning_prefix`
pub fn build_deprecation_warnings_with(
    config: &PipelineConfig,
    spec: &ClusterSpec,
) -> AnnotationRegistry {
    deprecation_registry(&config.provenance.warning_prefix, spec)
}

fn deprecation_registry(warning_prefix: &str, spec: &ClusterSpec) -> AnnotationRegistry {
    let registry = AnnotationRegistry::with_prefix(warning_prefix, DEPRECATION_WARNING_NAMESPACE);
    registry.populate(DEPRECATION_RULES, spec);
    registry
}
