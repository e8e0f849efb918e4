//! Decoding config files onto an existing configuration.
//!
//! The document is merged, not substituted: mappings merge key by key,
//! sequences and scalars replace, and keys the document leaves out (or sets
//! to `null`) keep whatever the destination already held.

use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use thiserror::Error;

use crate::config::schema::Configuration;

/// Camel-case keys written by older tooling, keyed by section.
const KEY_ALIASES: &[(&str, &str, &str)] = &[
    ("white_list", "processPaths", "process_paths"),
    ("white_list", "proxyPorts", "proxy_ports"),
    ("upgrade", "watchingPath", "watching_path"),
    ("tls-config", "certFilePath", "cert_file_path"),
    ("csi-proxy", "certFilePath", "cert_file_path"),
];

/// Errors raised while turning file content into a configuration.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    #[error("config document is empty")]
    Empty,

    #[error("config document is not valid YAML: {0}")]
    Syntax(#[source] serde_yaml::Error),

    #[error("config document must be a mapping at the top level")]
    NotAMapping,

    #[error("config document does not match the schema: {0}")]
    Schema(#[source] serde_yaml::Error),
}

/// Read `path` and merge its contents onto `dest`.
///
/// Performs no validation. On error `dest` is left unchanged.
pub fn decode_config(path: &Path, dest: &mut Configuration) -> Result<(), DecodeError> {
    let content = fs::read_to_string(path).map_err(DecodeError::Read)?;
    decode_config_str(&content, dest)
}

/// Merge a YAML (or JSON) document onto `dest`.
pub fn decode_config_str(content: &str, dest: &mut Configuration) -> Result<(), DecodeError> {
    if content.trim().is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut document = serde_yaml::from_str::<Value>(content).map_err(DecodeError::Syntax)?;
    document.apply_merge().map_err(DecodeError::Syntax)?;

    let overlay = match document {
        Value::Mapping(mapping) => normalize_keys(mapping),
        // A document holding only comments.
        Value::Null => return Err(DecodeError::Empty),
        _ => return Err(DecodeError::NotAMapping),
    };

    let mut merged = serde_yaml::to_value(&*dest).map_err(DecodeError::Schema)?;
    merge(&mut merged, Value::Mapping(overlay));

    *dest = serde_yaml::from_value(merged).map_err(DecodeError::Schema)?;
    Ok(())
}

/// Rewrite aliased keys to their canonical spelling. When both spellings are
/// present the canonical one wins.
fn normalize_keys(mut document: Mapping) -> Mapping {
    for &(section, alias, canonical) in KEY_ALIASES {
        let Some(Value::Mapping(inner)) = document.get_mut(section) else {
            continue;
        };
        if let Some(value) = inner.remove(alias) {
            if !inner.contains_key(canonical) {
                tracing::debug!(section, alias, canonical, "Accepting aliased config key");
                inner.insert(Value::String(canonical.to_string()), value);
            }
        }
    }
    document
}

fn merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (_, Value::Null) => {}
        (Value::Mapping(base), Value::Mapping(overlay)) => {
            for (key, value) in overlay {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None if value.is_null() => {}
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
