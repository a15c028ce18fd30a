//! Tracing subscriber setup

use hrsync_domain::{HrSyncError, LoggingConfig, Result};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `config.level` when set.
///
/// # Errors
/// `HrSyncError::Config` when the level directive does not parse or a
/// global subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| HrSyncError::Config(format!("Invalid log level {:?}: {e}", config.level)))?;

    let registry = tracing_subscriber::registry().with(filter);
    let installed = if config.json {
        registry.with(fmt::layer().json().with_current_span(true).with_target(true)).try_init()
    } else {
        registry.with(fmt::layer().with_target(true).compact()).try_init()
    };

    installed.map_err(|e| HrSyncError::Config(format!("Failed to install tracing subscriber: {e}")))
}

/// Short stable label for the `error` field of log lines.
///
/// Wrappers are looked through, so an aborted pass is labelled by what
/// aborted it.
pub fn error_label(err: &HrSyncError) -> &'static str {
    err.root().category().as_str()
}
