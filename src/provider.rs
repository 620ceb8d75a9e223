//! Device-location provider boundary.
//!
//! The watch coordinator consumes a [`LocationProvider`]: a capability that
//! answers one-shot position requests and opens continuous subscriptions.
//! Deliveries are asynchronous over channels, so the single-shot fix and
//! the first subscription update may arrive in either order; the
//! coordinator never assumes one precedes the other.

use std::fmt;
use std::time::{Duration, Instant};

use tokio::sync::{mpsc, oneshot};

use crate::coord::LatLng;
use crate::error::ProviderError;

/// One raw location reading from the provider.
///
/// Immutable once created; the filter evaluates it, movement correction
/// derives an adjusted copy, nothing mutates it in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionSample {
    /// Reported coordinate.
    pub coordinate: LatLng,
    /// Provider-reported uncertainty radius in meters (>= 0).
    pub accuracy_m: f64,
    /// When the reading was taken.
    pub timestamp: Instant,
}

impl PositionSample {
    /// Create a sample taken now.
    pub fn new(lat: f64, lon: f64, accuracy_m: f64) -> Self {
        Self {
            coordinate: LatLng::new(lat, lon),
            accuracy_m,
            timestamp: Instant::now(),
        }
    }

    /// Derive a sample with an adjusted coordinate, keeping accuracy and
    /// timestamp unchanged.
    pub fn with_coordinate(self, coordinate: LatLng) -> Self {
        Self { coordinate, ..self }
    }
}

/// Options passed through to the provider for every request.
///
/// The coordinator does not reimplement timeout logic; the provider's own
/// request timeout applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationOptions {
    /// Maximum wait before the provider fails a request.
    pub timeout: Duration,
    /// Request the most precise positioning the device supports.
    pub high_accuracy: bool,
    /// Maximum acceptable age of a cached reading; zero forces a fresh fix.
    pub maximum_age: Duration,
}

impl Default for LocationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            high_accuracy: true,
            maximum_age: Duration::ZERO,
        }
    }
}

/// Opaque handle identifying one active subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(pub u64);

impl fmt::Display for WatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One delivery on a continuous subscription.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// A raw position reading.
    Fix(PositionSample),
    /// A provider failure; terminal for this tick only, the subscription
    /// stays open.
    Error(ProviderError),
}

/// An open continuous subscription.
///
/// Dropping the receiver (or the provider closing its sender) ends the
/// stream; cancellation via [`LocationProvider::clear_watch`] uses the id.
#[derive(Debug)]
pub struct WatchSubscription {
    /// Handle for cancelling this subscription.
    pub id: WatchId,
    /// Stream of fixes and per-tick errors.
    pub events: mpsc::Receiver<WatchEvent>,
}

impl WatchSubscription {
    /// Create a subscription from a handle and an event stream.
    pub fn new(id: WatchId, events: mpsc::Receiver<WatchEvent>) -> Self {
        Self { id, events }
    }
}

/// Capability supplying raw position samples.
///
/// Implementations wrap the platform location API. All delivery is
/// asynchronous; none of these methods block the caller.
pub trait LocationProvider: Send + Sync {
    /// Request one immediate fix.
    ///
    /// The result arrives through the returned receiver once the provider
    /// resolves it. A dropped sender means the provider abandoned the
    /// request without an answer.
    fn request_position(
        &self,
        options: &LocationOptions,
    ) -> oneshot::Receiver<Result<PositionSample, ProviderError>>;

    /// Open a continuous subscription.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::ProviderUnavailable`] when the device has
    /// no location capability.
    fn watch_position(
        &self,
        options: &LocationOptions,
    ) -> Result<WatchSubscription, ProviderError>;

    /// Cancel a subscription previously opened with `watch_position`.
    ///
    /// Samples already in flight may still be delivered afterwards.
    fn clear_watch(&self, id: WatchId);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = LocationOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert!(options.high_accuracy);
        assert_eq!(options.maximum_age, Duration::ZERO);
    }

    #[test]
    fn test_sample_with_coordinate_keeps_metadata() {
        let sample = PositionSample::new(43.6, 1.4, 25.0);
        let moved = sample.with_coordinate(LatLng::new(43.7, 1.5));

        assert_eq!(moved.coordinate, LatLng::new(43.7, 1.5));
        assert_eq!(moved.accuracy_m, 25.0);
        assert_eq!(moved.timestamp, sample.timestamp);
    }

    #[test]
    fn test_watch_id_display() {
        assert_eq!(WatchId(7).to_string(), "7");
    }
}
