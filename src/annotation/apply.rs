//! Provenance and warning annotations on generated documents

use serde_json::Value;
use tracing::warn;
use ztp_document::{Document, DocumentError, Format};

use crate::config::PipelineConfig;

use super::registry::AnnotationRegistry;

/// Stamps the provenance annotation and any registry warnings onto
/// documents
#[derive(Debug, Clone)]
pub struct Annotator {
    annotation: String,
    value: String,
}

impl Default for Annotator {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl Annotator {
    pub fn new(config: &PipelineConfig) -> Self {
        Self {
            annotation: config.provenance.annotation.clone(),
            value: config.provenance.value.clone(),
        }
    }

    /// Annotate one document.
    ///
    /// The provenance annotation is always set. Warnings are added from each
    /// registry that has any, looked up by the document's `kind`; a missing
    /// or non-string `kind` skips them. Applying twice changes nothing.
    pub fn apply(&self, document: &mut Document, registries: &[&AnnotationRegistry]) {
        let kind = document.kind().map(str::to_string);
        document.with_annotations(|annotations| {
            annotations.insert(self.annotation.clone(), Value::String(self.value.clone()));

            let Some(kind) = kind else {
                return;
            };
            for registry in registries.iter().filter(|r| r.has_warnings()) {
                for warning in registry.warnings(&kind).unwrap_or_default() {
                    annotations.insert(
                        registry.annotation_key(&warning.field),
                        Value::String(warning.message),
                    );
                }
            }
        });
    }

    /// Annotate every document of a batch
    pub fn apply_all(&self, documents: &mut [Document], registries: &[&AnnotationRegistry]) {
        for document in documents.iter_mut() {
            self.apply(document, registries);
        }
    }

    /// Add the provenance annotation to a manifest given as text.
    pub fn annotate_manifest(&self, text: &str, format: Format) -> Result<String, DocumentError> {
        let mut document = Document::decode(text, format).map_err(|e| {
            warn!(error = %e, "could not decode manifest for annotation");
            e
        })?;
        self.apply(&mut document, &[]);
        document.encode(format)
    }
}
