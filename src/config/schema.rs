//! Schema definitions used to validate ingested documents.
//!
//! A [`Schema`] is a descriptor: a name plus a set of named, typed fields.
//! Callers build one up front and hand it to ingestion; the loader never keeps
//! it beyond the validation call.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::FieldError;

/// Expected shape of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Any value, including null.
    Any,
    String,
    /// Whole number (signed or unsigned).
    Integer,
    /// Any number, integer or float.
    Number,
    Boolean,
    /// Mapping with string keys and values of the inner type.
    Mapping(Box<FieldType>),
    Sequence(Box<FieldType>),
    /// Field may be absent or null; when present it must match the inner type.
    Optional(Box<FieldType>),
}

impl FieldType {
    pub fn mapping_of(inner: FieldType) -> Self {
        FieldType::Mapping(Box::new(inner))
    }

    pub fn sequence_of(inner: FieldType) -> Self {
        FieldType::Sequence(Box::new(inner))
    }

    pub fn optional(inner: FieldType) -> Self {
        FieldType::Optional(Box::new(inner))
    }

    pub(crate) fn is_optional(&self) -> bool {
        matches!(self, FieldType::Optional(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Any => write!(f, "any"),
            FieldType::String => write!(f, "string"),
            FieldType::Integer => write!(f, "integer"),
            FieldType::Number => write!(f, "number"),
            FieldType::Boolean => write!(f, "boolean"),
            FieldType::Mapping(inner) => write!(f, "mapping<string, {}>", inner),
            FieldType::Sequence(inner) => write!(f, "sequence<{}>", inner),
            FieldType::Optional(inner) => write!(f, "optional<{}>", inner),
        }
    }
}

/// A named, typed field of a schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: FieldType,
}

type TypedCheck = Arc<dyn Fn(&Map<String, Value>) -> Result<(), FieldError> + Send + Sync>;

/// Schema descriptor.
///
/// Field names are matched against the raw document keys, before lower-casing.
#[derive(Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
    deny_unknown_fields: bool,
    typed: Option<TypedCheck>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            deny_unknown_fields: false,
            typed: None,
        }
    }

    /// Schema whose validation is "the document deserializes into `T`".
    pub fn from_type<T: DeserializeOwned + 'static>() -> Self {
        let check: TypedCheck = Arc::new(|document: &Map<String, Value>| {
            deserialize_document::<T>(Value::Object(document.clone())).map(|_| ())
        });
        Self {
            name: std::any::type_name::<T>().to_string(),
            fields: Vec::new(),
            deny_unknown_fields: false,
            typed: Some(check),
        }
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, ty: FieldType) -> Self {
        self.fields.push(FieldSpec {
            name: name.into(),
            ty,
        });
        self
    }

    /// Reject document keys that are not declared fields.
    pub fn deny_unknown_fields(mut self) -> Self {
        self.deny_unknown_fields = true;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn denies_unknown_fields(&self) -> bool {
        self.deny_unknown_fields
    }

    pub(crate) fn typed_check(&self) -> Option<&TypedCheck> {
        self.typed.as_ref()
    }
}

/// Deserialize a document into `T`, keeping the path of the offending field.
pub(crate) fn deserialize_document<T: DeserializeOwned>(document: Value) -> Result<T, FieldError> {
    serde_path_to_error::deserialize(document).map_err(|e| {
        // The root path renders as ".", e.g. for a missing top-level field.
        let path = match e.path().to_string() {
            root if root == "." => String::new(),
            path => path,
        };
        FieldError::new(path, e.into_inner().to_string())
    })
}

impl fmt::Debug for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("deny_unknown_fields", &self.deny_unknown_fields)
            .field("typed", &self.typed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let schema = Schema::new("Settings")
            .field("PASSCODE", FieldType::String)
            .field("ENDPOINTS", FieldType::mapping_of(FieldType::String))
            .deny_unknown_fields();

        assert_eq!(schema.name(), "Settings");
        assert_eq!(schema.fields().len(), 2);
        assert_eq!(schema.fields()[1].ty.to_string(), "mapping<string, string>");
        assert!(schema.denies_unknown_fields());
        assert!(schema.typed_check().is_none());
    }

    #[test]
    fn test_from_type_uses_type_name() {
        #[derive(serde::Deserialize)]
        #[allow(dead_code)]
        struct Settings {
            passcode: String,
        }

        let schema = Schema::from_type::<Settings>();
        assert!(schema.name().ends_with("Settings"));
        assert!(schema.typed_check().is_some());
    }

    #[test]
    fn test_typed_errors_keep_field_path() {
        #[derive(Debug, serde::Deserialize)]
        #[allow(dead_code, non_snake_case)]
        struct Settings {
            PASSCODE: String,
            ENDPOINTS: std::collections::HashMap<String, String>,
        }

        let err = deserialize_document::<Settings>(serde_json::json!({
            "PASSCODE": "x",
            "ENDPOINTS": ["http://a"],
        }))
        .unwrap_err();
        assert_eq!(err.path, "ENDPOINTS");
        assert!(err.reason.contains("invalid type: sequence"));

        let err = deserialize_document::<Settings>(serde_json::json!({
            "PASSCODE": "x",
            "ENDPOINTS": {"A": 1},
        }))
        .unwrap_err();
        assert_eq!(err.path, "ENDPOINTS.A");

        let err = deserialize_document::<Settings>(serde_json::json!({"ENDPOINTS": {}}))
            .unwrap_err();
        assert_eq!(err.path, "");
        assert!(err.reason.contains("PASSCODE"));
    }
}
