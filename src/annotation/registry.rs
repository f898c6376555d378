//! Warning annotation registry
//!
//! Warnings are keyed by document kind and kept in insertion order. The
//! registry is populated once per cluster and then shared read-only while
//! documents are generated, so all access goes through an `RwLock`.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::constants::ZTP_WARNING_ANNOTATION;

/// A single warning for one field of a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationWarning {
    pub field: String,
    pub message: String,
}

/// Thread-safe store of warnings to annotate documents with
#[derive(Debug)]
pub struct AnnotationRegistry {
    /// `<warning prefix>-<namespace>`
    prefix: String,
    values: RwLock<BTreeMap<String, Vec<AnnotationWarning>>>,
}

impl AnnotationRegistry {
    /// Registry under the default warning prefix
    pub fn new(namespace: &str) -> Self {
        Self::with_prefix(ZTP_WARNING_ANNOTATION, namespace)
    }

    pub fn with_prefix(warning_prefix: &str, namespace: &str) -> Self {
        Self {
            prefix: format!("{}-{}", warning_prefix, namespace),
            values: RwLock::new(BTreeMap::new()),
        }
    }

    /// Record a warning for `kind`. Warnings for the same kind accumulate.
    pub fn add(&self, kind: &str, field: &str, message: &str) {
        // Entries are plain data, a panicked writer cannot leave them torn.
        let mut values = self.values.write().unwrap_or_else(PoisonError::into_inner);
        values
            .entry(kind.to_string())
            .or_default()
            .push(AnnotationWarning {
                field: field.to_string(),
                message: message.to_string(),
            });
    }

    /// Warnings recorded for `kind`, in insertion order
    pub fn warnings(&self, kind: &str) -> Option<Vec<AnnotationWarning>> {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.get(kind).cloned()
    }

    pub fn has_warnings(&self) -> bool {
        let values = self.values.read().unwrap_or_else(PoisonError::into_inner);
        values.values().any(|warnings| !warnings.is_empty())
    }

    /// Annotation key carrying the warning for `field`
    pub fn annotation_key(&self, field: &str) -> String {
        format!("{}-{}", self.prefix, field)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_empty_registry() {
        let registry = AnnotationRegistry::new("field-deprecation");

        assert!(!registry.has_warnings());
        assert_eq!(registry.warnings("AgentClusterInstall"), None);
    }

    #[test]
    fn test_add_keeps_order_per_kind() {
        let registry = AnnotationRegistry::new("field-deprecation");
        registry.add("ConfigMap", "b", "second field");
        registry.add("ConfigMap", "a", "first field");

        let warnings = registry.warnings("ConfigMap").unwrap();
        let fields: Vec<&str> = warnings.iter().map(|w| w.field.as_str()).collect();

        assert!(registry.has_warnings());
        assert_eq!(fields, vec!["b", "a"]);
        assert_eq!(registry.warnings("Secret"), None);
    }

    #[test]
    fn test_annotation_key() {
        let registry = AnnotationRegistry::new("field-deprecation");
        assert_eq!(
            registry.annotation_key("cpuset"),
            "ran.openshift.io/ztp-warning-field-deprecation-cpuset"
        );

        let custom = AnnotationRegistry::with_prefix("example.com/warn", "ns");
        assert_eq!(custom.annotation_key("f"), "example.com/warn-ns-f");
    }

    #[test]
    fn test_concurrent_add_and_read() {
        let registry = Arc::new(AnnotationRegistry::new("field-deprecation"));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    for j in 0..50 {
                        registry.add("Kind", &format!("f{}-{}", i, j), "msg");
                        let _ = registry.warnings("Kind");
                        assert!(registry.has_warnings());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(registry.warnings("Kind").unwrap().len(), 400);
    }
}
