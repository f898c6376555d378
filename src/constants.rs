//! Fixed names shared with the rest of the site generator.

/// Kind of the documents merged per role.
pub const MACHINE_CONFIG_KIND: &str = "MachineConfig";

/// API version stamped onto merged MachineConfigs.
pub const MACHINE_CONFIG_API_VERSION: &str = "machineconfiguration.openshift.io/v1";

/// Label carrying the MachineConfig pool role.
pub const MACHINE_CONFIG_ROLE_LABEL: &str = "machineconfiguration.openshift.io/role";

/// Prefix of the merged MachineConfig name; the role is appended.
pub const MERGED_NAME_PREFIX: &str = "predefined-extra-manifests";

/// Annotation marking a document as generated by the site pipeline.
pub const ZTP_ANNOTATION: &str = "ran.openshift.io/ztp-gitops-generated";

/// Value of [`ZTP_ANNOTATION`]. A dynamic value may replace it later.
pub const ZTP_ANNOTATION_VALUE: &str = "{}";

/// Prefix of every warning annotation.
pub const ZTP_WARNING_ANNOTATION: &str = "ran.openshift.io/ztp-warning";

/// Registry namespace used for field deprecation warnings.
pub const DEPRECATION_WARNING_NAMESPACE: &str = "field-deprecation";

/// BareMetalHost annotation controlling hardware inspection.
pub const INSPECT_ANNOTATION: &str = "inspect.metal3.io";

/// The only [`INSPECT_ANNOTATION`] value kept on generated hosts.
pub const INSPECT_DISABLED: &str = "disabled";

/// Annotation bag of node labels; also the prefix of the expanded keys.
pub const NODE_LABEL_PREFIX: &str = "bmac.agent-install.openshift.io.node-label";

/// Install config key receiving the CPU partitioning mode.
pub const CPU_PARTITIONING_KEY: &str = "cpuPartitioningMode";

/// Top-level key shared by the network annotation and install config overrides.
pub const NETWORKING_KEY: &str = "networking";
