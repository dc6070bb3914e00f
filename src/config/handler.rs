//! The contract every config format handler satisfies.
//!
//! A handler owns the path of one config file and, once ingested, the file's
//! top-level values. The dispatch key (the file extension) is an associated
//! constant on [`HandlerType`], so a handler type without one does not compile.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::schema::Schema;
use crate::config::values::ConfigValues;
use crate::error::ConfigError;

/// Object-safe handler interface used by the registry and the factory.
pub trait ConfigHandler: fmt::Debug + Send + Sync {
    /// The extension this handler is registered under (e.g. `.json`).
    fn extension(&self) -> &'static str;

    fn source(&self) -> &SourcePath;

    fn source_mut(&mut self) -> &mut SourcePath;

    /// Values from the last successful ingestion.
    fn values(&self) -> &ConfigValues;

    /// Read the file at the stored path, parse it, validate it against
    /// `schema` when given, and expose its top-level keys as values.
    ///
    /// Fails with [`ConfigError::PathNotSet`] if no path was assigned. On
    /// failure the previously ingested values are left untouched.
    fn ingest(&mut self, schema: Option<&Schema>) -> Result<&mut dyn ConfigHandler, ConfigError>;

    /// Absolute path of the config file, if set.
    fn path(&self) -> Option<&Path> {
        self.source().get()
    }

    /// Point the handler at a new file. The path must exist.
    fn set_path(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.source_mut().set(path)
    }
}

/// Compile-time part of the contract: a concrete handler type with its
/// dispatch extension.
pub trait HandlerType: ConfigHandler + Default + 'static {
    const EXTENSION: &'static str;

    /// Construct a handler already pointed at `path`.
    fn with_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut handler = Self::default();
        handler.set_path(path.as_ref())?;
        Ok(handler)
    }
}

/// Absolute, existence-checked path of a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePath {
    path: Option<PathBuf>,
}

impl SourcePath {
    pub fn get(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Resolve `path` and store it, replacing any previous one.
    ///
    /// A path that does not exist is rejected and the stored path is kept.
    pub fn set(&mut self, path: &Path) -> Result<(), ConfigError> {
        self.path = Some(resolve(path)?);
        Ok(())
    }

    /// The stored path, or [`ConfigError::PathNotSet`].
    pub fn require(&self) -> Result<&Path, ConfigError> {
        self.get().ok_or(ConfigError::PathNotSet)
    }
}

/// Resolve `path` to an absolute path with symlinks and `.`/`..` removed.
pub fn resolve(path: &Path) -> Result<PathBuf, ConfigError> {
    fs::canonicalize(path).map_err(|source| ConfigError::PathNotFound {
        path: path.to_path_buf(),
        source,
    })
}

/// Extension key of `path`: the final `.` and what follows it in the file
/// name, or an empty string when there is none.
pub fn extension_key(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Read a config file as UTF-8 text.
pub(crate) fn read_source(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::InvalidData => ConfigError::MalformedInput {
            path: path.to_path_buf(),
            reason: "file is not valid UTF-8".to_string(),
        },
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })
}
