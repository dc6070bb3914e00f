//! Error types for configuration loading and handler registration.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, parsing or validating a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The given path does not resolve to an existing filesystem entry.
    #[error("The given path {} doesn't exist: {source}", .path.display())]
    PathNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ingestion was attempted before a path was assigned.
    #[error("The path is not set yet")]
    PathNotSet,

    /// No registered handler matches the file extension.
    #[error("{} type is not yet supported", display_extension(.extension))]
    UnsupportedFormat { extension: String },

    /// The schema argument cannot be used as a schema definition.
    #[error("Invalid schema argument: {0}")]
    InvalidSchemaArgument(String),

    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a top-level mapping in the expected format.
    #[error("Malformed config file {}: {reason}", .path.display())]
    MalformedInput { path: PathBuf, reason: String },

    /// The parsed content does not satisfy the supplied schema.
    #[error("Schema validation failed: {}", FieldErrors(.0))]
    SchemaValidationFailed(Vec<FieldError>),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Errors raised while registering handler types.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A handler type was registered without a dispatch extension.
    #[error("Can't register {type_name} without an extension defined")]
    MissingContract { type_name: String },

    /// Another handler already owns this extension.
    #[error("A handler for {extension} is already registered ({existing})")]
    DuplicateExtension { extension: String, existing: String },
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Dotted path to the offending field (e.g. `ENDPOINTS.A`).
    pub path: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.reason)
        } else {
            write!(f, "{}: {}", self.path, self.reason)
        }
    }
}

struct FieldErrors<'a>(&'a [FieldError]);

impl fmt::Display for FieldErrors<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", err)?;
        }
        Ok(())
    }
}

fn display_extension(extension: &str) -> &str {
    if extension.is_empty() {
        "<no extension>"
    } else {
        extension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::UnsupportedFormat {
            extension: ".toml".into(),
        };
        assert_eq!(err.to_string(), ".toml type is not yet supported");

        let err = ConfigError::UnsupportedFormat {
            extension: String::new(),
        };
        assert_eq!(err.to_string(), "<no extension> type is not yet supported");

        let err = ConfigError::SchemaValidationFailed(vec![
            FieldError::new("PASSCODE", "missing required field"),
            FieldError::new("ENDPOINTS", "expected mapping, found sequence"),
        ]);
        assert_eq!(
            err.to_string(),
            "Schema validation failed: PASSCODE: missing required field, ENDPOINTS: expected mapping, found sequence"
        );
    }

    #[test]
    fn test_registry_error_converts() {
        let err: ConfigError = RegistryError::MissingContract {
            type_name: "Broken".into(),
        }
        .into();
        assert!(matches!(
            err,
            ConfigError::Registry(RegistryError::MissingContract { .. })
        ));
        assert!(err.to_string().contains("Broken"));
    }
}
