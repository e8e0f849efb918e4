//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults.rs (compiled-in baseline)
//!     → loader.rs (stat: missing file keeps the baseline)
//!     → decoder.rs (merge YAML/JSON onto the baseline)
//!     → validation.rs (listen → white list → upgrade)
//!     → Configuration (validated, immutable)
//!     → shared via Arc to all subsystems
//!
//! TLS layer startup:
//!     tls.rs reads the certificate and resolves the insecure flag
//!     → ResolvedTls folded into the CSI proxy settings
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - A missing file is not an error, a directory is
//! - Validation separates syntactic (serde) from semantic checks
//! - TLS checks are a separate phase owned by the TLS consumer

pub mod decoder;
pub mod defaults;
pub mod loader;
pub mod schema;
pub mod tls;
pub mod validation;

pub use decoder::DecodeError;
pub use loader::{load_config, ConfigError};
pub use schema::Configuration;
pub use schema::CsiProxyConfig;
pub use schema::TlsConfig;
pub use schema::UpgradeConfig;
pub use schema::UpgradeMode;
pub use schema::WhiteListConfig;
pub use tls::{ResolvedTls, TlsError};
pub use validation::{validate_config, ValidationError};
