//! Logging abstraction for the watch coordinator.
//!
//! The coordinator reports lifecycle transitions and provider errors to a
//! logging sink without depending on a concrete backend. Components accept
//! an `Arc<dyn Logger>` and use the `log_*` macros:
//!
//! ```
//! use steadywatch::log::{Logger, NoOpLogger};
//! use steadywatch::{log_debug, log_error};
//! use std::sync::Arc;
//!
//! let logger: Arc<dyn Logger> = Arc::new(NoOpLogger);
//! log_debug!(logger, "watch opened");
//! log_error!(logger, "provider reported: {}", "timeout");
//! ```
//!
//! Two implementations are provided:
//!
//! - [`TracingLogger`]: delegates to the `tracing` crate for production use
//! - [`NoOpLogger`]: discards everything, for tests and benchmarks

mod noop;
mod tracing_adapter;

pub use noop::NoOpLogger;
pub use tracing_adapter::TracingLogger;

use std::fmt::Arguments;

/// Severity of a log message.
///
/// Routine lifecycle events are logged at `Debug`; a duplicate watch start
/// is a `Warn` diagnostic; provider errors are logged at `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    /// Routine state transitions and per-sample decisions.
    Debug,
    /// General information.
    Info,
    /// Recoverable anomalies such as a duplicate start.
    Warn,
    /// Provider failures.
    Error,
}

/// Sink for leveled text messages.
///
/// Implementations must be `Send + Sync` so the watch coordinator task can
/// share the sink with its caller.
pub trait Logger: Send + Sync {
    /// Log a message at the given level.
    fn log(&self, level: LogLevel, args: Arguments<'_>);

    /// Log a debug-level message.
    fn debug(&self, args: Arguments<'_>) {
        self.log(LogLevel::Debug, args);
    }

    /// Log an info-level message.
    fn info(&self, args: Arguments<'_>) {
        self.log(LogLevel::Info, args);
    }

    /// Log a warning-level message.
    fn warn(&self, args: Arguments<'_>) {
        self.log(LogLevel::Warn, args);
    }

    /// Log an error-level message.
    fn error(&self, args: Arguments<'_>) {
        self.log(LogLevel::Error, args);
    }
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {
        $logger.debug(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {
        $logger.info(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {
        $logger.warn(format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {
        $logger.error(format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_macros_accept_format_arguments() {
        let logger = NoOpLogger;
        log_debug!(logger, "sample at {}, {}", 43.6, 1.4);
        log_warn!(logger, "duplicate start");
        log_error!(logger, "error: {}", "timeout");
    }
}
