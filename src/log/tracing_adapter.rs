//! Adapter onto the `tracing` crate.

use std::fmt::Arguments;

use super::{LogLevel, Logger};

/// Logger implementation that forwards to `tracing`.
///
/// Bridges the [`Logger`] trait to the `tracing` ecosystem so the host
/// application keeps its subscribers, filtering, and output configuration
/// while the watch coordinator stays decoupled from the backend. Assumes a
/// subscriber has been installed, for example via
/// [`crate::logging::init_logging`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    /// Create a new tracing adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, args: Arguments<'_>) {
        match level {
            LogLevel::Debug => tracing::debug!("{}", args),
            LogLevel::Info => tracing::info!("{}", args),
            LogLevel::Warn => tracing::warn!("{}", args),
            LogLevel::Error => tracing::error!("{}", args),
        }
    }
}
