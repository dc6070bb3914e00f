//! Shared fixtures for integration tests.

use std::fs;
use std::path::PathBuf;

use confparser::config::FieldType;
use confparser::Schema;
use tempfile::TempDir;

#[allow(dead_code)]
pub const SETTINGS_JSON: &str =
    r#"{"PASSCODE": "x", "ENDPOINTS": {"A": "http://a", "B": "http://b"}}"#;

/// Write `content` to `name` inside a fresh temporary directory.
///
/// The directory is removed when the returned guard is dropped.
pub fn config_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[allow(dead_code)]
/// Schema requiring `PASSCODE: string` and `ENDPOINTS: mapping<string, string>`.
pub fn settings_schema() -> Schema {
    Schema::new("Settings")
        .field("PASSCODE", FieldType::String)
        .field("ENDPOINTS", FieldType::mapping_of(FieldType::String))
}
