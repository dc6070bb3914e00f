//! JSON config handler.

use serde_json::{Map, Value};

use crate::config::handler::{read_source, ConfigHandler, HandlerType, SourcePath};
use crate::config::schema::Schema;
use crate::config::validation::{kind_of, validate_document};
use crate::config::values::ConfigValues;
use crate::error::ConfigError;

/// Handler for `.json` files. The document must be a top-level object.
#[derive(Debug, Default)]
pub struct JsonConfigHandler {
    source: SourcePath,
    values: ConfigValues,
}

impl JsonConfigHandler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandlerType for JsonConfigHandler {
    const EXTENSION: &'static str = ".json";
}

impl ConfigHandler for JsonConfigHandler {
    fn extension(&self) -> &'static str {
        Self::EXTENSION
    }

    fn source(&self) -> &SourcePath {
        &self.source
    }

    fn source_mut(&mut self) -> &mut SourcePath {
        &mut self.source
    }

    fn values(&self) -> &ConfigValues {
        &self.values
    }

    fn ingest(&mut self, schema: Option<&Schema>) -> Result<&mut dyn ConfigHandler, ConfigError> {
        let path = self.source.require()?.to_path_buf();

        let content = read_source(&path)?;
        let document = parse_object(&content).map_err(|reason| ConfigError::MalformedInput {
            path: path.clone(),
            reason,
        })?;

        if let Some(schema) = schema {
            validate_document(schema, &document)?;
            tracing::trace!(schema = schema.name(), "Schema validation passed");
        }

        self.values = ConfigValues::from_document(document);

        tracing::debug!(
            path = %path.display(),
            keys = self.values.len(),
            "JSON config ingested"
        );

        Ok(self)
    }
}

fn parse_object(content: &str) -> Result<Map<String, Value>, String> {
    match serde_json::from_str::<Value>(content).map_err(|e| e.to_string())? {
        Value::Object(map) => Ok(map),
        other => Err(format!("expected a top-level object, found {}", kind_of(&other))),
    }
}
