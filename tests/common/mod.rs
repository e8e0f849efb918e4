//! Shared helpers for integration tests.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

/// Write `content` as `config.yaml` inside `dir`.
pub fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.yaml");
    fs::write(&path, content).unwrap();
    path
}

/// Write a placeholder PEM file and return its path as a string.
#[allow(dead_code)]
pub fn write_cert(dir: &TempDir, name: &str) -> String {
    let path = dir.path().join(name);
    fs::write(
        &path,
        "-----BEGIN CERTIFICATE-----\nMIIB\n-----END CERTIFICATE-----\n",
    )
    .unwrap();
    path.to_string_lossy().into_owned()
}

/// Quote a path for embedding in a YAML document.
#[allow(dead_code)]
pub fn yaml_str(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
