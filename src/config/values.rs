//! Ingested configuration values.
//!
//! Every top-level key of a config file ends up here, lower-cased. Values keep
//! their parsed shape; nothing below the top level is touched.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::config::schema::deserialize_document;
use crate::error::ConfigError;

/// Top-level key/value pairs of an ingested config file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigValues {
    entries: Map<String, Value>,
}

impl ConfigValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a parsed document, lower-casing every top-level key.
    ///
    /// Keys that collide after lower-casing resolve to the last one in
    /// document order.
    pub fn from_document(document: Map<String, Value>) -> Self {
        let mut entries = Map::with_capacity(document.len());
        for (key, value) in document {
            entries.insert(key.to_lowercase(), value);
        }
        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(&key.to_lowercase())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn get_i64(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_mapping(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get(key).and_then(Value::as_object)
    }

    pub fn get_sequence(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deserialize the (lower-cased) values into a typed record.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T, ConfigError> {
        deserialize_document(Value::Object(self.entries.clone()))
            .map_err(|e| ConfigError::SchemaValidationFailed(vec![e]))
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.entries
    }
}
