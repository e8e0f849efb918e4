//! End-to-end tests of the startup contract: what fails the agent and what
//! silently falls back to defaults.

use std::sync::Arc;
use std::thread;

use host_agent::config::defaults::DEFAULT_LISTEN;
use host_agent::config::{ConfigError, Configuration, DecodeError, ValidationError};
use host_agent::lifecycle::{Startup, StartupError};
use tempfile::TempDir;

mod common;

#[test]
fn test_missing_file_starts_with_defaults() {
    let dir = TempDir::new().unwrap();
    let startup = Startup::load(&dir.path().join("nope.yaml")).unwrap();

    assert_eq!(*startup.config(), Configuration::default());
    assert_eq!(
        startup.upgrade_watch_path(),
        Some(Configuration::default().upgrade.watching_path.as_str())
    );
}

#[test]
fn test_directory_fails_startup() {
    let dir = TempDir::new().unwrap();
    let err = Startup::load(dir.path()).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Config(ConfigError::IsDirectory { .. })
    ));
}

#[test]
fn test_malformed_file_fails_startup() {
    let dir = TempDir::new().unwrap();
    let path = common::write_config(&dir, "listen: {{{{\n");
    let err = Startup::load(&path).unwrap_err();
    assert!(matches!(
        err,
        StartupError::Config(ConfigError::Decode {
            source: DecodeError::Syntax(_),
            ..
        })
    ));
}

#[test]
fn test_full_document() {
    let dir = TempDir::new().unwrap();
    let path = common::write_config(
        &dir,
        r#"
debug: true
listen: "127.0.0.1:9796"
proxy: "127.0.0.1:9797"
white_list:
  process_paths:
    - "/usr/local/bin/kube-proxy"
    - "/usr/local/bin/flanneld"
  proxy_ports: [0, 10250, 65535]
upgrade:
  mode: none
"#,
    );

    let startup = Startup::load(&path).unwrap();
    let config = startup.config();
    assert!(config.debug);
    assert_eq!(config.listen, "127.0.0.1:9796");
    assert_eq!(config.white_list.process_paths.len(), 2);
    assert_eq!(config.white_list.proxy_ports, vec![0, 10250, 65535]);
    assert_eq!(startup.upgrade_watch_path(), None);
    assert!(config.csi_proxy.is_none());
}

#[test]
fn test_validation_order_is_observable() {
    let dir = TempDir::new().unwrap();
    let path = common::write_config(
        &dir,
        r#"
white_list:
  process_paths: ["   "]
upgrade:
  mode: sometimes
"#,
    );

    let err = Startup::load(&path).unwrap_err();
    match err {
        StartupError::Config(ConfigError::Validation { source, .. }) => {
            assert!(matches!(source, ValidationError::WhiteList(_)));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_layered_error_message() {
    let dir = TempDir::new().unwrap();
    let path = common::write_config(&dir, "upgrade:\n  mode: watching\n  watching_path: ''\n");

    let message = Startup::load(&path).unwrap_err().to_string();
    assert!(message.contains("invalid config"), "{message}");
    assert!(message.contains("failed to validate upgrade field"), "{message}");
    assert!(message.contains("could not accept blank path as watching path"), "{message}");
}

#[test]
fn test_csi_proxy_absent_skips_tls() {
    let dir = TempDir::new().unwrap();
    // Default certificate path does not exist in the test environment.
    let startup = Startup::load(&dir.path().join("missing")).unwrap();
    assert_eq!(startup.csi_proxy_config().unwrap(), None);
}

#[test]
fn test_csi_proxy_receives_resolved_tls() {
    let dir = TempDir::new().unwrap();
    let cert = common::write_cert(&dir, "ca.pem");
    let path = common::write_config(
        &dir,
        &format!(
            r#"
csi-proxy:
  url: "https://example.invalid/csi-proxy/v1.1.1"
  kubeletPath: "c:/var/lib/kubelet"
tls-config:
  cert_file_path: {}
"#,
            common::yaml_str(&cert)
        ),
    );

    let startup = Startup::load(&path).unwrap();
    let csi_proxy = startup.csi_proxy_config().unwrap().expect("csi proxy configured");
    assert_eq!(csi_proxy.tls.cert_file_path, cert);
    assert_eq!(csi_proxy.tls.insecure, Some(false));
    assert!(csi_proxy.extra.contains_key("kubeletPath"));

    // The shared configuration is not modified by the TLS phase.
    assert_eq!(startup.config().tls_config.insecure, None);
}

#[test]
fn test_tls_phase_fails_on_unreadable_certificate() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.pem").to_string_lossy().into_owned();
    let path = common::write_config(
        &dir,
        &format!(
            "csi-proxy:\n  url: x\ntls-config:\n  cert_file_path: {}\n  insecure: true\n",
            common::yaml_str(&missing)
        ),
    );

    // General validation does not look at the certificate.
    let startup = Startup::load(&path).unwrap();
    let err = startup.csi_proxy_config().unwrap_err();
    assert!(matches!(err, StartupError::Tls(_)));
    assert!(err.to_string().contains("missing.pem"));
}

#[test]
fn test_config_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let path = common::write_config(&dir, "proxy: \"127.0.0.1:1\"\n");
    let startup = Startup::load(&path).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let config: Arc<Configuration> = startup.config();
            thread::spawn(move || config.listen.clone())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), DEFAULT_LISTEN);
    }
}
