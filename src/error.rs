//! Provider error taxonomy and reporting.
//!
//! Provider failures are reported to the logging sink at error severity
//! and never surface as panics or faults the caller must catch. Each error
//! is terminal for its single request or subscription tick only; the watch
//! lifecycle continues. Retry, if desired, is caller policy layered
//! outside this crate.

use crate::log::Logger;

/// Errors reported by a location provider.
///
/// `Unknown` and `PositionUnavailable` carry the provider's free-text
/// message appended to the category text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// Unclassified provider failure (code 0).
    #[error("unknown location error: {0}")]
    Unknown(String),

    /// The user denied the location permission (code 1).
    #[error("location permission denied by user")]
    PermissionDenied,

    /// The device could not produce a position (code 2).
    #[error("position is not available: {0}")]
    PositionUnavailable(String),

    /// The provider's own request timeout elapsed (code 3).
    #[error("location request timed out")]
    Timeout,

    /// No location capability is present on this device. Recovery is out
    /// of scope; callers should check for the capability before use.
    #[error("no location capability available")]
    ProviderUnavailable,
}

impl ProviderError {
    /// Map a platform error code and free-text message to a category.
    ///
    /// Codes: `0 = Unknown`, `1 = PermissionDenied`,
    /// `2 = PositionUnavailable`, `3 = Timeout`. Unrecognized codes fold
    /// into `Unknown`. The message is retained only for codes 0 and 2.
    pub fn from_code(code: u8, message: &str) -> Self {
        match code {
            1 => Self::PermissionDenied,
            2 => Self::PositionUnavailable(message.to_string()),
            3 => Self::Timeout,
            _ => Self::Unknown(message.to_string()),
        }
    }
}

/// Report a provider error through the logging sink.
pub(crate) fn report_provider_error(logger: &dyn Logger, error: &ProviderError) {
    logger.error(format_args!("location provider error: {}", error));
}
