//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Freeze it behind an `Arc` for every consumer
//! - Run the TLS phase on behalf of the CSI proxy
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - No global state: consumers receive the `Arc` explicitly

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{ConfigError, Configuration, CsiProxyConfig, ResolvedTls, TlsError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to validate tls config: {0}")]
    Tls(#[from] TlsError),
}

/// Validated configuration ready to be handed to the agent's subsystems.
#[derive(Debug, Clone)]
pub struct Startup {
    config: Arc<Configuration>,
}

impl Startup {
    /// Load `path` over the defaults and validate it.
    pub fn load(path: &Path) -> Result<Self, StartupError> {
        let config = Configuration::load(path)?;
        Ok(Self::from_config(config))
    }

    /// Wrap an already validated configuration.
    pub fn from_config(config: Configuration) -> Self {
        tracing::info!(
            listen = %config.listen,
            proxy = %config.proxy,
            debug = config.debug,
            process_paths = config.white_list.process_paths.len(),
            proxy_ports = config.white_list.proxy_ports.len(),
            upgrade_watching = config.upgrade.is_watching_mode(),
            csi_proxy = config.csi_proxy.is_some(),
            "Configuration ready"
        );
        Self {
            config: Arc::new(config),
        }
    }

    /// Shared handle to the frozen configuration.
    pub fn config(&self) -> Arc<Configuration> {
        Arc::clone(&self.config)
    }

    /// Path the upgrade watcher should monitor, if watching is enabled.
    pub fn upgrade_watch_path(&self) -> Option<&str> {
        self.config
            .upgrade
            .is_watching_mode()
            .then_some(self.config.upgrade.watching_path.as_str())
    }

    /// Run the TLS validation phase.
    pub fn resolve_tls(&self) -> Result<ResolvedTls, StartupError> {
        Ok(self.config.validate_tls_config()?)
    }

    /// CSI proxy settings with the resolved TLS values applied.
    ///
    /// Returns `None` without touching the certificate when no CSI proxy is
    /// configured.
    pub fn csi_proxy_config(&self) -> Result<Option<CsiProxyConfig>, StartupError> {
        let Some(csi_proxy) = &self.config.csi_proxy else {
            return Ok(None);
        };
        let resolved = self.resolve_tls()?;
        Ok(Some(csi_proxy.with_resolved_tls(&resolved)))
    }
}
