//! Error types for the manifest merge pipeline.

use ztp_document::DocumentError;

/// Boxed error returned by a [`ConfigMerger`](crate::ConfigMerger).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors returned while merging per-role MachineConfigs
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Input text could not be decoded
    #[error("could not decode manifest {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: DocumentError,
    },

    /// A document declared the target kind but lacks its shape
    #[error("manifest {name} is not a valid {kind}: {source}")]
    TypeProjection {
        name: String,
        kind: String,
        #[source]
        source: DocumentError,
    },

    /// The injected merge capability failed
    #[error("merging {kind} fragments for role '{role}' failed: {source}")]
    MergeDelegation {
        role: String,
        kind: String,
        #[source]
        source: BoxError,
    },

    /// Nothing was left of the merged fragment after trimming
    #[error("empty {kind} after merging role '{role}'")]
    EmptyResult { role: String, kind: String },

    /// The merged fragment could not be serialized
    #[error("could not encode merged manifest {name}: {source}")]
    Encode {
        name: String,
        #[source]
        source: DocumentError,
    },
}
