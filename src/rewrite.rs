//! Structural rewrites of BareMetalHost annotations

use serde_json::Value;
use tracing::debug;
use ztp_document::Document;

use crate::constants::{INSPECT_ANNOTATION, INSPECT_DISABLED, NODE_LABEL_PREFIX};

/// Remove the inspection annotation unless it disables inspection.
pub fn drop_stale_inspection_annotation(document: &mut Document) {
    let Some(annotations) = document.annotations_mut() else {
        return;
    };
    let stale = annotations
        .get(INSPECT_ANNOTATION)
        .is_some_and(|value| value.as_str() != Some(INSPECT_DISABLED));
    if stale {
        annotations.shift_remove(INSPECT_ANNOTATION);
    }
}

/// Expand the node label bag into one annotation per label.
///
/// `{"<prefix>": {"node-role.kubernetes.io/environment": "production"}}`
/// becomes `{"<prefix>.node-role.kubernetes.io/environment": "production"}`.
pub fn expand_node_label_annotation(document: &mut Document) {
    let Some(annotations) = document.annotations_mut() else {
        return;
    };
    let labels = match annotations.get(NODE_LABEL_PREFIX) {
        Some(Value::Object(labels)) => labels.clone(),
        Some(_) => {
            debug!("node label annotation is not a mapping, left as is");
            return;
        }
        None => return,
    };

    for (key, value) in labels {
        annotations.insert(format!("{}.{}", NODE_LABEL_PREFIX, key), value);
    }
    annotations.shift_remove(NODE_LABEL_PREFIX);
}
