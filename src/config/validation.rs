//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject blank listen endpoints
//! - Reject blank whitelist paths and out-of-range ports
//! - Reject unknown upgrade modes and watching mode without a path
//!
//! # Design Decisions
//! - Fail fast: the first violation is returned, nothing is aggregated
//! - Checks run in a fixed order (listen, white list, upgrade) so the
//!   surfaced error is predictable
//! - Validation is a pure function over `&Configuration`

use thiserror::Error;

use crate::config::schema::{Configuration, UpgradeConfig, UpgradeMode, WhiteListConfig};

/// Highest port number accepted in the white list.
pub const MAX_PORT: i64 = 0xFFFF;

/// Errors from the top-level validator.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("listen could not be blank")]
    BlankListen,

    #[error("failed to validate white list field: {0}")]
    WhiteList(#[source] WhiteListError),

    #[error("failed to validate upgrade field: {0}")]
    Upgrade(#[source] UpgradeError),
}

/// White list violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WhiteListError {
    #[error("could not accept blank path as process white list (entry {index})")]
    BlankProcessPath { index: usize },

    #[error("could not accept invalid port number {port} in proxy ports (entry {index})")]
    InvalidProxyPort { index: usize, port: i64 },
}

/// Upgrade policy violations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpgradeError {
    #[error("could not accept blank path as watching path")]
    BlankWatchingPath,

    #[error("could not accept {0:?} as upgrade mode")]
    UnrecognizedMode(String),
}

/// Run every field check in order and return the first failure.
pub fn validate_config(config: &Configuration) -> Result<(), ValidationError> {
    if config.listen.trim().is_empty() {
        return Err(ValidationError::BlankListen);
    }

    config
        .white_list
        .validate()
        .map_err(ValidationError::WhiteList)?;

    let mode = config
        .upgrade
        .validate()
        .map_err(ValidationError::Upgrade)?;

    tracing::debug!(
        listen = %config.listen,
        process_paths = config.white_list.process_paths.len(),
        proxy_ports = config.white_list.proxy_ports.len(),
        upgrade_mode = %mode,
        "Configuration validated"
    );

    Ok(())
}

impl WhiteListConfig {
    /// Check paths first, then ports. Stops at the first bad entry.
    pub fn validate(&self) -> Result<(), WhiteListError> {
        if let Some(index) = self
            .process_paths
            .iter()
            .position(|path| path.trim().is_empty())
        {
            return Err(WhiteListError::BlankProcessPath { index });
        }

        if let Some((index, &port)) = self
            .proxy_ports
            .iter()
            .enumerate()
            .find(|(_, port)| !(0..=MAX_PORT).contains(*port))
        {
            return Err(WhiteListError::InvalidProxyPort { index, port });
        }

        Ok(())
    }
}

impl UpgradeConfig {
    /// Validate the policy and return the parsed mode.
    pub fn validate(&self) -> Result<UpgradeMode, UpgradeError> {
        let mode = UpgradeMode::parse(&self.mode)
            .ok_or_else(|| UpgradeError::UnrecognizedMode(self.mode.clone()))?;

        if mode == UpgradeMode::Watching && self.watching_path.trim().is_empty() {
            return Err(UpgradeError::BlankWatchingPath);
        }

        Ok(mode)
    }
}
