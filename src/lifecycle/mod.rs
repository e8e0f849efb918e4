//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Defaults → Load config → Validate → Freeze (Arc)
//!     → TLS phase when the CSI proxy is configured
//! ```
//!
//! # Design Decisions
//! - Ordered startup: general validation first, TLS second
//! - Any error aborts startup; nothing is retried

pub mod startup;

pub use startup::{Startup, StartupError};
