//! Silent logger implementation.

use std::fmt::Arguments;

use super::{LogLevel, Logger};

/// A logger that discards all messages.
///
/// Useful in unit tests where per-sample debug output would be noise, and
/// as the default sink when the host application has no logging configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl Logger for NoOpLogger {
    #[inline]
    fn log(&self, _level: LogLevel, _args: Arguments<'_>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_logger_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpLogger>();
    }

    #[test]
    fn test_noop_logger_as_trait_object() {
        let logger: Box<dyn Logger> = Box::new(NoOpLogger);
        logger.debug(format_args!("discarded"));
        logger.error(format_args!("also discarded"));
    }
}
