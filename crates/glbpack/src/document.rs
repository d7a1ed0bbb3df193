//! Mutable scene document with accessors for the sections the packer touches.
//!
//! The document is a JSON tree. Only `buffers`, `bufferViews`, `shaders`,
//! `images` and `extensionsUsed` are inspected; every other key passes
//! through serialization verbatim. Object key order is preserved end to end,
//! which is what makes body offset assignment and the output bytes
//! deterministic.

use serde_json::{Map, Value};

use crate::error::{PackError, Result};

/// A glTF scene document loaded from JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDocument {
    root: Map<String, Value>,
}

impl SceneDocument {
    /// Parse a document from JSON bytes.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        Self::from_value(serde_json::from_slice(data)?)
    }

    /// Wrap an already-parsed JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(PackError::InvalidDocument(
                "top level is not an object".into(),
            )),
        }
    }

    /// Serialize the document to JSON bytes.
    ///
    /// The emitter measures this exact length to compute padding, so the
    /// same document must always serialize to the same bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(&self.root)?)
    }

    /// The `buffers` section. Required.
    pub fn buffers_mut(&mut self) -> Result<&mut Map<String, Value>> {
        self.section_mut("buffers")
    }

    /// The `bufferViews` section. Required.
    pub fn buffer_views_mut(&mut self) -> Result<&mut Map<String, Value>> {
        self.section_mut("bufferViews")
    }

    /// The `shaders` section, if the document has one.
    pub fn shaders_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        self.optional_section_mut("shaders")
    }

    /// The `images` section, if the document has one.
    pub fn images_mut(&mut self) -> Result<Option<&mut Map<String, Value>>> {
        self.optional_section_mut("images")
    }

    /// Replace a top-level section wholesale.
    pub fn set_section(&mut self, key: &str, section: Map<String, Value>) {
        self.root.insert(key.to_string(), Value::Object(section));
    }

    /// Append a name to `extensionsUsed`, creating the array if absent.
    pub fn push_extension_used(&mut self, name: &str) {
        match self.root.get_mut("extensionsUsed") {
            Some(Value::Array(names)) => names.push(Value::String(name.to_string())),
            _ => {
                self.root.insert(
                    "extensionsUsed".to_string(),
                    Value::Array(vec![Value::String(name.to_string())]),
                );
            }
        }
    }

    /// Direct read access to a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    fn section_mut(&mut self, key: &str) -> Result<&mut Map<String, Value>> {
        match self.root.get_mut(key) {
            Some(Value::Object(map)) => Ok(map),
            Some(_) => Err(PackError::InvalidDocument(format!(
                "{key:?} is not an object"
            ))),
            None => Err(PackError::InvalidDocument(format!(
                "missing {key:?} section"
            ))),
        }
    }

    fn optional_section_mut(&mut self, key: &str) -> Result<Option<&mut Map<String, Value>>> {
        match self.root.get_mut(key) {
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(_) => Err(PackError::InvalidDocument(format!(
                "{key:?} is not an object"
            ))),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_top_level_object() {
        let result = SceneDocument::from_slice(b"[1, 2, 3]");
        assert!(matches!(result, Err(PackError::InvalidDocument(_))));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let result = SceneDocument::from_slice(b"{ not json");
        assert!(matches!(result, Err(PackError::Json(_))));
    }

    #[test]
    fn test_missing_buffers_section() {
        let mut doc = SceneDocument::from_slice(b"{}").unwrap();
        assert!(matches!(
            doc.buffers_mut(),
            Err(PackError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_optional_sections() {
        let mut doc =
            SceneDocument::from_slice(br#"{"shaders": {"s0": {"uri": "a.glsl"}}}"#).unwrap();
        assert!(doc.shaders_mut().unwrap().is_some());
        assert!(doc.images_mut().unwrap().is_none());
    }

    #[test]
    fn test_non_object_section_is_invalid() {
        let mut doc = SceneDocument::from_slice(br#"{"buffers": []}"#).unwrap();
        assert!(matches!(
            doc.buffers_mut(),
            Err(PackError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_push_extension_used_appends_or_creates() {
        let mut doc = SceneDocument::from_slice(br#"{"extensionsUsed": ["EXT_other"]}"#).unwrap();
        doc.push_extension_used("KHR_binary_glTF");
        assert_eq!(
            doc.get("extensionsUsed").unwrap(),
            &serde_json::json!(["EXT_other", "KHR_binary_glTF"])
        );

        let mut doc = SceneDocument::from_slice(b"{}").unwrap();
        doc.push_extension_used("KHR_binary_glTF");
        assert_eq!(
            doc.get("extensionsUsed").unwrap(),
            &serde_json::json!(["KHR_binary_glTF"])
        );
    }

    #[test]
    fn test_unknown_keys_round_trip() {
        let text = br#"{"asset":{"generator":"x"},"custom":[1,{"k":null}],"buffers":{}}"#;
        let doc = SceneDocument::from_slice(text).unwrap();
        assert_eq!(doc.to_bytes().unwrap(), text.to_vec());
    }

    #[test]
    fn test_key_order_is_preserved() {
        let text = br#"{"z":1,"a":2,"m":3}"#;
        let doc = SceneDocument::from_slice(text).unwrap();
        assert_eq!(doc.to_bytes().unwrap(), text.to_vec());
    }
}
