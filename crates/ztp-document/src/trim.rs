//! Recursive removal of empty fields
//!
//! Empty means:
//! - `null`
//! - an empty string
//! - an empty sequence or mapping, including one emptied by trimming
//!
//! Booleans and numbers are always kept, `false` and `0` included.

use serde_json::Value;

/// Trim a value tree, returning `None` when the value itself is empty.
pub fn trim_empty(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::Array(items) => {
            let kept: Vec<Value> = items.into_iter().filter_map(trim_empty).collect();
            (!kept.is_empty()).then_some(Value::Array(kept))
        }
        Value::Object(map) => {
            let kept: serde_json::Map<String, Value> = map
                .into_iter()
                .filter_map(|(key, val)| trim_empty(val).map(|val| (key, val)))
                .collect();
            (!kept.is_empty()).then_some(Value::Object(kept))
        }
        other => Some(other),
    }
}
