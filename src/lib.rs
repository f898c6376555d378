//! ZTP site manifest post-processing
//!
//! Transforms the documents generated for one cluster of a site definition:
//! - merges per-role MachineConfigs into one manifest per role
//! - annotates generated documents with provenance and deprecation warnings
//! - builds the install config override annotation
//! - rewrites BareMetalHost annotations into the form controllers expect
//!
//! Every call is synchronous and works on caller-owned, in-memory documents.

pub mod annotation;
pub mod cluster;
pub mod config;
pub mod constants;
pub mod error;
pub mod fragment;
pub mod manifests;
pub mod overrides;
pub mod rewrite;

pub use annotation::{
    build_deprecation_warnings, build_deprecation_warnings_with, AnnotationRegistry, Annotator,
};
pub use cluster::{ClusterSpec, CpuPartitioningMode, NodeSpec};
pub use config::{ConfigError, PipelineConfig};
pub use error::{BoxError, ManifestError};
pub use fragment::{ConfigFragment, ConfigMerger, MergeContext};
pub use manifests::ManifestMerger;
pub use overrides::OverrideError;
pub use ztp_document::{Document, DocumentError, Format};
