//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config, lifecycle
//!     → tracing events (structured fields)
//!     → logging.rs subscriber (stderr)
//! ```

pub mod logging;

pub use logging::{init_logging, LogHandle};
