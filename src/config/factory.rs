//! Entry point turning a file path into an ingested handler.

use std::path::Path;

use crate::config::handler::{extension_key, resolve, ConfigHandler};
use crate::config::registry::{global_registry, HandlerRegistry};
use crate::config::schema::Schema;
use crate::error::ConfigError;

/// Picks the handler for a file by extension and ingests the file with it.
#[derive(Debug, Default)]
pub struct ConfigFactory {
    registry: Option<HandlerRegistry>,
}

impl ConfigFactory {
    /// Load `path` using the process-wide registry.
    pub fn get_conf(
        path: impl AsRef<Path>,
        schema: Option<&Schema>,
    ) -> Result<Box<dyn ConfigHandler>, ConfigError> {
        Self::default().load(path, schema)
    }

    /// Factory bound to a caller-owned registry instead of the process-wide one.
    pub fn with_registry(registry: HandlerRegistry) -> Self {
        Self {
            registry: Some(registry),
        }
    }

    /// Resolve `path`, pick the handler registered for its extension, point
    /// it at the file and ingest it.
    pub fn load(
        &self,
        path: impl AsRef<Path>,
        schema: Option<&Schema>,
    ) -> Result<Box<dyn ConfigHandler>, ConfigError> {
        let path = path.as_ref();
        let abs_path = resolve(path)?;

        let extension = extension_key(path);
        let mut handler = self
            .create(&extension)
            .ok_or(ConfigError::UnsupportedFormat { extension })?;

        tracing::debug!(
            path = %abs_path.display(),
            extension = handler.extension(),
            "Resolved config handler"
        );

        handler.set_path(&abs_path)?;
        handler.ingest(schema)?;
        Ok(handler)
    }

    fn create(&self, extension: &str) -> Option<Box<dyn ConfigHandler>> {
        match &self.registry {
            Some(registry) => registry.create(extension),
            None => global_registry().create(extension),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::FieldType;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_get_conf_json() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "app.json",
            r#"{"PASSCODE": "x", "ENDPOINTS": {"A": "http://a"}}"#,
        );

        let conf = ConfigFactory::get_conf(&path, None).unwrap();
        assert_eq!(conf.extension(), ".json");
        assert_eq!(conf.path(), Some(fs::canonicalize(&path).unwrap().as_path()));
        assert_eq!(conf.values().get_str("passcode"), Some("x"));
        assert_eq!(conf.values().get("endpoints"), Some(&json!({"A": "http://a"})));
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigFactory::get_conf(dir.path().join("nope.json"), None).unwrap_err();
        assert!(matches!(err, ConfigError::PathNotFound { .. }));
    }

    #[test]
    fn test_unsupported_format() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.toml", "passcode = \"x\"\n");

        match ConfigFactory::get_conf(&path, None) {
            Err(ConfigError::UnsupportedFormat { extension }) => assert_eq!(extension, ".toml"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }

        let path = write(&dir, "noext", "{}");
        match ConfigFactory::get_conf(&path, None) {
            Err(ConfigError::UnsupportedFormat { extension }) => assert!(extension.is_empty()),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_dispatches_on_link_name() {
        let dir = TempDir::new().unwrap();
        let target = write(&dir, "data.txt", r#"{"MODE": "linked"}"#);
        let link = dir.path().join("app.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let conf = ConfigFactory::get_conf(&link, None).unwrap();
        assert_eq!(conf.extension(), ".json");
        assert_eq!(conf.path(), Some(fs::canonicalize(&target).unwrap().as_path()));
        assert_eq!(conf.values().get_str("mode"), Some("linked"));

        assert!(matches!(
            ConfigFactory::get_conf(&target, None),
            Err(ConfigError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_custom_registry() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.json", r#"{"A": 1}"#);

        let factory = ConfigFactory::with_registry(HandlerRegistry::new());
        assert!(matches!(
            factory.load(&path, None),
            Err(ConfigError::UnsupportedFormat { .. })
        ));

        let factory = ConfigFactory::with_registry(HandlerRegistry::with_defaults());
        let conf = factory.load(&path, None).unwrap();
        assert_eq!(conf.values().get_i64("a"), Some(1));
    }

    #[test]
    fn test_schema_failure_aborts() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "app.json", r#"{"ENDPOINTS": {}}"#);
        let schema = Schema::new("Settings").field("PASSCODE", FieldType::String);

        assert!(matches!(
            ConfigFactory::get_conf(&path, Some(&schema)),
            Err(ConfigError::SchemaValidationFailed(_))
        ));
    }
}
