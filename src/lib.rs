//! Host agent configuration library.

pub mod config;
pub mod lifecycle;
pub mod observability;

pub use config::schema::Configuration;
pub use lifecycle::Startup;
