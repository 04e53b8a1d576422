//! Diagnostic logging setup

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the log filter, preferring `RUST_LOG` over the CLI-derived level
pub fn log_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()))
}

/// Install a stderr subscriber for the process
///
/// Does nothing if a global subscriber is already installed.
pub fn init_logging(level: Level) {
    let _ = fmt()
        .with_env_filter(log_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
