//! Tracing subscriber bootstrap.
//!
//! Host applications that do not already install a `tracing` subscriber can
//! call [`init_logging`] once at startup, then hand a
//! [`TracingLogger`](crate::log::TracingLogger) to the watcher.

use tracing_subscriber::EnvFilter;

/// Initialize console logging.
///
/// Output goes to stdout, filtered by the `RUST_LOG` environment variable
/// (defaults to `info` when unset).
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
}
