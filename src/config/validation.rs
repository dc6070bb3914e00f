//! Schema validation of parsed documents.
//!
//! # Responsibilities
//! - Reject schema descriptors that cannot define a document shape
//! - Check required fields are present and typed as declared
//! - Optionally reject undeclared keys
//!
//! # Design Decisions
//! - Returns all field errors, not just the first
//! - Validation is a pure function: (Schema, document) → Result<(), Vec<FieldError>>
//! - Runs before any value is made visible on a handler

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::config::schema::{FieldType, Schema};
use crate::error::{ConfigError, FieldError};

/// Check that the descriptor is usable as a schema definition.
pub fn check_definition(schema: &Schema) -> Result<(), ConfigError> {
    if schema.name().trim().is_empty() {
        return Err(ConfigError::InvalidSchemaArgument(
            "schema has no name".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for field in schema.fields() {
        if field.name.is_empty() {
            return Err(ConfigError::InvalidSchemaArgument(format!(
                "schema {} declares a field with an empty name",
                schema.name()
            )));
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ConfigError::InvalidSchemaArgument(format!(
                "schema {} declares field {} more than once",
                schema.name(),
                field.name
            )));
        }
    }
    Ok(())
}

/// Validate a parsed top-level document against `schema`.
pub fn validate_document(
    schema: &Schema,
    document: &Map<String, Value>,
) -> Result<(), ConfigError> {
    check_definition(schema)?;

    let mut errors = Vec::new();

    for field in schema.fields() {
        match document.get(&field.name) {
            None if field.ty.is_optional() => {}
            None => errors.push(FieldError::new(&field.name, "missing required field")),
            Some(value) => check_value(&field.name, &field.ty, value, &mut errors),
        }
    }

    if schema.denies_unknown_fields() {
        for key in document.keys() {
            if !schema.fields().iter().any(|f| &f.name == key) {
                errors.push(FieldError::new(key, "unknown field"));
            }
        }
    }

    if let Some(check) = schema.typed_check() {
        if let Err(e) = (**check)(document) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::SchemaValidationFailed(errors))
    }
}

fn check_value(path: &str, ty: &FieldType, value: &Value, errors: &mut Vec<FieldError>) {
    match (ty, value) {
        (FieldType::Any, _) => {}
        (FieldType::Optional(_), Value::Null) => {}
        (FieldType::Optional(inner), v) => check_value(path, inner, v, errors),
        (FieldType::String, Value::String(_)) => {}
        (FieldType::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {}
        (FieldType::Number, Value::Number(_)) => {}
        (FieldType::Boolean, Value::Bool(_)) => {}
        (FieldType::Mapping(inner), Value::Object(map)) => {
            for (key, v) in map {
                check_value(&format!("{}.{}", path, key), inner, v, errors);
            }
        }
        (FieldType::Sequence(inner), Value::Array(items)) => {
            for (i, v) in items.iter().enumerate() {
                check_value(&format!("{}[{}]", path, i), inner, v, errors);
            }
        }
        (expected, found) => errors.push(FieldError::new(
            path,
            format!("expected {}, found {}", expected, kind_of(found)),
        )),
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "mapping",
    }
}
