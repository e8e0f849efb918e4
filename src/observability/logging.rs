//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber before the config is read
//! - Raise the level to debug once the config asks for it
//!
//! # Design Decisions
//! - `RUST_LOG` always wins over the `debug` flag
//! - Logs go to stderr so command output on stdout stays parseable

use tracing_subscriber::{
    fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Handle for adjusting the log level after startup.
pub struct LogHandle {
    filter: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// Filter directive used when `RUST_LOG` is not set.
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "host_agent=debug"
    } else {
        "host_agent=info"
    }
}

/// Install the global subscriber.
pub fn init_logging(debug: bool) -> LogHandle {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(default_directive(debug)), false),
    };
    let (filter_layer, filter) = reload::Layer::new(filter);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    LogHandle { filter, from_env }
}

impl LogHandle {
    /// Switch to debug output unless `RUST_LOG` pinned the level.
    pub fn enable_debug(&self) {
        if self.from_env {
            return;
        }
        if let Err(e) = self.filter.reload(EnvFilter::new(default_directive(true))) {
            tracing::warn!(error = %e, "Failed to raise log level");
            return;
        }
        tracing::debug!("Debug logging enabled");
    }
}
