//! Configuration loading from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::decoder::{decode_config, DecodeError};
use crate::config::schema::Configuration;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not load config from {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not load config from directory {}", path.display())]
    IsDirectory { path: PathBuf },

    #[error("could not decode config {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("invalid config {}: {source}", path.display())]
    Validation {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },
}

/// Load `path` onto `dest` and validate the result.
///
/// A missing file is not an error: `dest` is left as it was. Validation
/// only runs when a file was actually decoded.
pub fn load_config(path: &Path, dest: &mut Configuration) -> Result<(), ConfigError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Config file not found, keeping current configuration");
            return Ok(());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if metadata.is_dir() {
        return Err(ConfigError::IsDirectory {
            path: path.to_path_buf(),
        });
    }

    decode_config(path, dest).map_err(|source| ConfigError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    validate_config(dest).map_err(|source| ConfigError::Validation {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), "Configuration loaded");
    Ok(())
}

impl Configuration {
    /// Start from the defaults and load `path` on top of them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        load_config(path, &mut config)?;
        Ok(config)
    }
}
