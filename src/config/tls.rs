//! Certificate checks run by the TLS layer at its own startup.
//!
//! The general loader does not call into this module. The result is handed
//! to the CSI proxy, which folds it into its own settings; the root
//! configuration is never written back.

use std::fs;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::{Configuration, CsiProxyConfig, TlsConfig};

/// Errors from the TLS validation phase.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read certificate from {}: {source}", path.display())]
    ReadCertificate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read certificate from {}: file is empty", path.display())]
    EmptyCertificate { path: PathBuf },
}

/// TLS settings after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTls {
    /// Set only when a certificate other than the compiled-in default is in
    /// effect.
    pub cert_file_path: Option<String>,

    /// Unset flags resolve to `false`.
    pub insecure: bool,
}

impl TlsConfig {
    /// Check the certificate is readable and resolve the insecure flag.
    pub fn validate(&self) -> Result<ResolvedTls, TlsError> {
        let path = PathBuf::from(&self.cert_file_path);
        let bytes = fs::read(&path).map_err(|source| TlsError::ReadCertificate {
            path: path.clone(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(TlsError::EmptyCertificate { path });
        }

        Ok(self.resolve())
    }

    /// Resolve the settings handed to the TLS consumer. Does no I/O.
    pub fn resolve(&self) -> ResolvedTls {
        let cert_file_path = if self.uses_default_cert() {
            None
        } else {
            tracing::info!(path = %self.cert_file_path, "Using non-default certificate");
            Some(self.cert_file_path.clone())
        };

        let insecure = self.is_insecure();
        if insecure {
            tracing::warn!("TLS certificate verification disabled");
        }

        ResolvedTls {
            cert_file_path,
            insecure,
        }
    }
}

impl Configuration {
    /// Validate the `tls-config` section.
    pub fn validate_tls_config(&self) -> Result<ResolvedTls, TlsError> {
        self.tls_config.validate()
    }
}

impl CsiProxyConfig {
    /// Copy of these settings with the resolved TLS values applied.
    ///
    /// The insecure flag is always made explicit; the certificate path is
    /// only replaced when a non-default one was resolved.
    pub fn with_resolved_tls(&self, resolved: &ResolvedTls) -> CsiProxyConfig {
        let mut derived = self.clone();
        if let Some(path) = &resolved.cert_file_path {
            derived.tls.cert_file_path = path.clone();
        }
        derived.tls.insecure = Some(resolved.insecure);
        derived
    }
}
