//! Built-in configuration layer
//!
//! Every value defaults to the fixed name used by the site generator.

use serde_json::{json, Value};
use ztp_document::Format;

use crate::constants::{
    MACHINE_CONFIG_API_VERSION, MACHINE_CONFIG_KIND, MACHINE_CONFIG_ROLE_LABEL,
    MERGED_NAME_PREFIX, ZTP_ANNOTATION, ZTP_ANNOTATION_VALUE, ZTP_WARNING_ANNOTATION,
};

/// Built-in defaults, the lowest configuration layer
pub struct BuiltinDefaults;

impl BuiltinDefaults {
    /// Defaults as a JSON layer for merging
    pub fn to_value() -> Value {
        json!({
            "merge": {
                "target_kind": MACHINE_CONFIG_KIND,
                "target_api_version": MACHINE_CONFIG_API_VERSION,
                "role_label": MACHINE_CONFIG_ROLE_LABEL,
                "name_prefix": MERGED_NAME_PREFIX,
                "output_format": Format::Yaml,
            },
            "provenance": {
                "annotation": ZTP_ANNOTATION,
                "value": ZTP_ANNOTATION_VALUE,
                "warning_prefix": ZTP_WARNING_ANNOTATION,
            }
        })
    }
}
