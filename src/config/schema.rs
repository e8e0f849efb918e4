//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from the config file.
//! Field names follow the on-disk keys (`white_list`, `tls-config`, ...).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    self, DEFAULT_CERT_PATH, DEFAULT_UPGRADE_MODE, DEFAULT_UPGRADE_WATCHING_PATH,
};

/// Root configuration for the host agent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Configuration {
    /// Raise log verbosity to debug.
    pub debug: bool,

    /// Local endpoint the agent listens on.
    pub listen: String,

    /// Upstream endpoint requests are proxied to.
    pub proxy: String,

    /// Processes and ports permitted for privileged proxying.
    pub white_list: WhiteListConfig,

    /// Self-upgrade policy.
    pub upgrade: UpgradeConfig,

    /// Embedded system agent settings, passed through untouched.
    #[serde(rename = "systemagent", skip_serializing_if = "Option::is_none")]
    pub system_agent: Option<serde_yaml::Value>,

    /// CSI proxy settings, passed through apart from their TLS keys.
    #[serde(rename = "csi-proxy", skip_serializing_if = "Option::is_none")]
    pub csi_proxy: Option<CsiProxyConfig>,

    /// Certificate settings consumed by the TLS layer.
    #[serde(rename = "tls-config")]
    pub tls_config: TlsConfig,
}

impl Default for Configuration {
    fn default() -> Self {
        defaults::default_config()
    }
}

/// Allow-list of executables and target ports.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct WhiteListConfig {
    /// Executable paths permitted to run through the agent.
    pub process_paths: Vec<String>,

    /// Ports permitted as proxy targets.
    ///
    /// Kept signed and wide so that out-of-range values survive decoding and
    /// are rejected by validation with a useful message.
    pub proxy_ports: Vec<i64>,
}

/// Upgrade policy. `mode` is kept as the raw string from the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UpgradeConfig {
    /// `"watching"`, `"none"` or empty.
    pub mode: String,

    /// Path monitored for upgrade signals in watching mode.
    pub watching_path: String,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_UPGRADE_MODE.to_string(),
            watching_path: DEFAULT_UPGRADE_WATCHING_PATH.to_string(),
        }
    }
}

impl UpgradeConfig {
    /// Whether the upgrade watcher should be started.
    ///
    /// Compares the raw mode exactly: `" watching"` passes validation but is
    /// not watching mode.
    pub fn is_watching_mode(&self) -> bool {
        self.mode == UpgradeMode::WATCHING
    }
}

/// Recognized upgrade modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeMode {
    /// An external watcher monitors `watching_path`.
    Watching,
    /// Upgrades are disabled.
    None,
    /// Mode left empty; treated like `None`.
    Unset,
}

impl UpgradeMode {
    pub const WATCHING: &'static str = "watching";
    pub const NONE: &'static str = "none";

    /// Parse a mode string after trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            Self::WATCHING => Some(Self::Watching),
            Self::NONE => Some(Self::None),
            "" => Some(Self::Unset),
            _ => None,
        }
    }
}

impl fmt::Display for UpgradeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeMode::Watching => f.write_str(Self::WATCHING),
            UpgradeMode::None => f.write_str(Self::NONE),
            UpgradeMode::Unset => f.write_str("unset"),
        }
    }
}

/// Certificate settings for the TLS layer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// PEM bundle trusted by the TLS layer.
    pub cert_file_path: String,

    /// Skip certificate verification. Unset means secure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert_file_path: DEFAULT_CERT_PATH.to_string(),
            insecure: None,
        }
    }
}

impl TlsConfig {
    /// Resolve the tri-state flag. Unset resolves to secure.
    pub fn is_insecure(&self) -> bool {
        self.insecure.unwrap_or(false)
    }

    /// Whether the compiled-in certificate path is configured.
    pub fn uses_default_cert(&self) -> bool {
        self.cert_file_path == DEFAULT_CERT_PATH
    }
}

/// Settings for the privileged CSI proxy.
///
/// Only the embedded TLS keys are interpreted here; everything else is owned
/// by the CSI proxy and preserved as-is.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CsiProxyConfig {
    #[serde(flatten)]
    pub tls: TlsConfig,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
