//! Error types for document decoding and encoding.

/// Errors raised while converting between text, generic documents and typed
/// projections.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The top level of the text is not a mapping.
    #[error("expected a mapping at the document root, found a {0}")]
    NotAMapping(&'static str),

    /// The document does not have the shape of the requested type.
    #[error("document does not match the requested shape: {0}")]
    Projection(#[source] serde_json::Error),
}
