//! Generic manifest documents.
//!
//! A [`Document`] is the durable, untyped form of a generated manifest: an
//! insertion-ordered mapping of string keys to JSON-shaped values. It can be
//! decoded from and encoded to YAML or JSON text, projected into a typed
//! struct, and trimmed of empty fields.

pub mod error;
mod format;
mod trim;

pub use error::DocumentError;
pub use format::Format;
pub use trim::trim_empty;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Top-level key holding the object metadata.
pub const METADATA_KEY: &str = "metadata";

/// Metadata key holding the annotation map.
pub const ANNOTATIONS_KEY: &str = "annotations";

/// A named manifest decoded into a generic value tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing mapping
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Decode text in the given format.
    ///
    /// Blank or `null` input yields an empty document. Any other non-mapping
    /// top level is rejected.
    pub fn decode(text: &str, format: Format) -> Result<Self, DocumentError> {
        if text.trim().is_empty() {
            return Ok(Self::new());
        }
        let value: Value = match format {
            Format::Yaml => serde_yaml::from_str(text)?,
            Format::Json => serde_json::from_str(text)?,
        };
        Self::try_from(value)
    }

    /// Encode to text in the given format
    pub fn encode(&self, format: Format) -> Result<String, DocumentError> {
        match format {
            Format::Yaml => Ok(serde_yaml::to_string(&self.0)?),
            Format::Json => Ok(serde_json::to_string_pretty(&self.0)?),
        }
    }

    /// Serialize a typed object into a document
    pub fn from_typed<T: Serialize>(typed: &T) -> Result<Self, DocumentError> {
        let value = serde_json::to_value(typed).map_err(DocumentError::Projection)?;
        Self::try_from(value)
    }

    /// Project the document onto a typed shape
    pub fn to_typed<T: DeserializeOwned>(&self) -> Result<T, DocumentError> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(DocumentError::Projection)
    }

    /// The `kind` field, when present and a string
    pub fn kind(&self) -> Option<&str> {
        self.0.get("kind").and_then(Value::as_str)
    }

    /// `metadata.name`, when present and a string
    pub fn name(&self) -> Option<&str> {
        self.metadata()?.get("name").and_then(Value::as_str)
    }

    pub fn metadata(&self) -> Option<&Map<String, Value>> {
        self.0.get(METADATA_KEY).and_then(Value::as_object)
    }

    pub fn annotations(&self) -> Option<&Map<String, Value>> {
        self.metadata()?.get(ANNOTATIONS_KEY).and_then(Value::as_object)
    }

    /// Mutable access to an existing annotation map; never creates one.
    pub fn annotations_mut(&mut self) -> Option<&mut Map<String, Value>> {
        self.0
            .get_mut(METADATA_KEY)
            .and_then(Value::as_object_mut)?
            .get_mut(ANNOTATIONS_KEY)
            .and_then(Value::as_object_mut)
    }

    /// Run `f` on the annotation map, creating `metadata` and
    /// `metadata.annotations` when absent.
    ///
    /// A `metadata` or `annotations` entry that is not a mapping (for
    /// example an explicit `null`) is replaced by an empty mapping. Entries
    /// that already exist keep their position.
    pub fn with_annotations<R>(&mut self, f: impl FnOnce(&mut Map<String, Value>) -> R) -> R {
        let mut metadata = take_object(&mut self.0, METADATA_KEY);
        let mut annotations = take_object(&mut metadata, ANNOTATIONS_KEY);
        let result = f(&mut annotations);
        metadata.insert(ANNOTATIONS_KEY.to_string(), Value::Object(annotations));
        self.0.insert(METADATA_KEY.to_string(), Value::Object(metadata));
        result
    }

    /// Set a single string annotation
    pub fn set_annotation(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.with_annotations(|annotations| {
            annotations.insert(key.into(), Value::String(value.into()));
        });
    }

    /// Drop every empty field; `None` when nothing meaningful is left.
    pub fn trimmed(self) -> Option<Self> {
        match trim_empty(Value::Object(self.0))? {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn as_map_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<Value> for Document {
    type Error = DocumentError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            other => Err(DocumentError::NotAMapping(value_type(&other))),
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        Value::Object(doc.0)
    }
}

/// Take the mapping stored under `key`, leaving `null` in its slot.
fn take_object(map: &mut Map<String, Value>, key: &str) -> Map<String, Value> {
    match map.get_mut(key).map(Value::take) {
        Some(Value::Object(inner)) => inner,
        _ => Map::new(),
    }
}

fn value_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
