//! steadywatch - a steadier location feed on top of noisy device providers.
//!
//! Raw location APIs emit samples with irregular accuracy. This crate
//! wraps such a provider in a watch coordinator that filters out
//! low-quality readings, smooths the reported accuracy signal with an
//! exponential moving average, optionally dampens positional jitter via
//! great-circle movement correction, and forwards only usable updates to
//! the caller.
//!
//! # Usage
//!
//! ```ignore
//! use steadywatch::{LocationWatcher, WatcherConfig};
//! use steadywatch::log::TracingLogger;
//! use std::sync::Arc;
//!
//! steadywatch::logging::init_logging()?;
//!
//! let mut watcher = LocationWatcher::new(provider, Arc::new(TracingLogger));
//! watcher.start_watch(
//!     |first| center_map(first),
//!     |update| move_marker(update),
//! );
//!
//! println!("smoothed accuracy: {:.1} m", watcher.get_average_accuracy());
//! watcher.stop_watch();
//! ```
//!
//! # Components
//!
//! - [`watcher`] - `LocationWatcher` lifecycle coordinator (idle/watching)
//! - [`filter`] - `AccuracyFilter` accept/reject plus accuracy smoothing
//! - [`movement`] - `MovementCorrector`, opt-in great-circle correction
//! - [`provider`] - `LocationProvider` boundary trait and sample types
//! - [`coord`] - `LatLng` and great-circle mathematics
//! - [`error`] - provider error taxonomy
//! - [`log`] / [`logging`] - logging sink abstraction and bootstrap

pub mod coord;
pub mod error;
pub mod filter;
pub mod log;
pub mod logging;
pub mod movement;
pub mod provider;
pub mod watcher;

pub use coord::LatLng;
pub use error::ProviderError;
pub use filter::{AccuracyFilter, SmoothingConfig, Verdict};
pub use movement::{MovementConfig, MovementCorrector};
pub use provider::{
    LocationOptions, LocationProvider, PositionSample, WatchEvent, WatchId, WatchSubscription,
};
pub use watcher::{LocationWatcher, WatcherConfig};

/// Version of the steadywatch library.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
