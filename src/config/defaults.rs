//! Compiled-in defaults for the agent configuration.

use crate::config::schema::{Configuration, TlsConfig, UpgradeConfig, WhiteListConfig};

#[cfg(windows)]
mod platform {
    pub const LISTEN: &str = r"\\.\pipe\rancher_wins";
    pub const PROXY: &str = r"\\.\pipe\rancher_wins_proxy";
    pub const UPGRADE_WATCHING_PATH: &str = r"c:\etc\rancher\wins\wins.exe";
    pub const CERT_PATH: &str = r"c:\etc\rancher\agent\ranchercert";
    pub const CONFIG_PATH: &str = r"c:\etc\rancher\wins\config";
}

#[cfg(not(windows))]
mod platform {
    pub const LISTEN: &str = "/run/host-agent/agent.sock";
    pub const PROXY: &str = "/run/host-agent/proxy.sock";
    pub const UPGRADE_WATCHING_PATH: &str = "/etc/host-agent/host-agent";
    pub const CERT_PATH: &str = "/etc/host-agent/agent/cacerts.pem";
    pub const CONFIG_PATH: &str = "/etc/host-agent/config";
}

/// Local endpoint the agent binds when the file does not say otherwise.
pub const DEFAULT_LISTEN: &str = platform::LISTEN;

/// Upstream endpoint requests are proxied to.
pub const DEFAULT_PROXY: &str = platform::PROXY;

/// Path the upgrade watcher monitors in watching mode.
pub const DEFAULT_UPGRADE_WATCHING_PATH: &str = platform::UPGRADE_WATCHING_PATH;

/// Certificate the TLS layer trusts unless overridden.
pub const DEFAULT_CERT_PATH: &str = platform::CERT_PATH;

/// Where the binary looks for its config file.
pub const DEFAULT_CONFIG_PATH: &str = platform::CONFIG_PATH;

/// Upgrade mode used when the file does not set one.
pub const DEFAULT_UPGRADE_MODE: &str = "watching";

/// Build the baseline configuration.
///
/// Performs no I/O and always returns the same value.
pub fn default_config() -> Configuration {
    Configuration {
        debug: false,
        listen: DEFAULT_LISTEN.to_string(),
        proxy: DEFAULT_PROXY.to_string(),
        white_list: WhiteListConfig {
            process_paths: Vec::new(),
            proxy_ports: Vec::new(),
        },
        upgrade: UpgradeConfig::default(),
        system_agent: None,
        csi_proxy: None,
        tls_config: TlsConfig {
            cert_file_path: DEFAULT_CERT_PATH.to_string(),
            insecure: None,
        },
    }
}
