//! Location-watch coordinator.
//!
//! [`LocationWatcher`] owns the lifecycle of one continuous location
//! subscription: `{Idle, Watching}`, initial state Idle, reusable
//! indefinitely. Starting a watch requests an immediate single-shot fix,
//! resets the per-session filter and corrector state, and opens the
//! provider subscription; stopping cancels the subscription and leaves
//! the session state inert but readable.
//!
//! # Data flow
//!
//! ```text
//! LocationProvider -> coordinator task -> AccuracyFilter
//!                                           -> [MovementCorrector] -> on_update
//! ```
//!
//! Provider errors bypass the filter and go straight to the logging sink
//! at error severity.
//!
//! # Concurrency
//!
//! `start_watch` returns before any fix arrives. The single-shot fix and
//! subscription updates are independent deliveries and may interleave in
//! any order. Session state lives behind one `RwLock` with the
//! coordinator task as its only writer; `stop_watch` cancels the task via
//! a `CancellationToken`, and samples still in flight after cancellation
//! are dropped.
//!
//! # Example
//!
//! ```ignore
//! use steadywatch::watcher::LocationWatcher;
//! use steadywatch::log::TracingLogger;
//! use std::sync::Arc;
//!
//! let mut watcher = LocationWatcher::new(provider, Arc::new(TracingLogger));
//! watcher.start_watch(
//!     |first| println!("first fix: {}", first.coordinate),
//!     |update| println!("update: {}", update.coordinate),
//! );
//! // ... later ...
//! watcher.stop_watch();
//! ```

use std::sync::{Arc, RwLock};

use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::error::{report_provider_error, ProviderError};
use crate::filter::{AccuracyFilter, SmoothingConfig, Verdict};
use crate::log::Logger;
use crate::movement::{MovementConfig, MovementCorrector};
use crate::provider::{
    LocationOptions, LocationProvider, PositionSample, WatchEvent, WatchId, WatchSubscription,
};
use crate::{log_debug, log_warn};

/// Configuration for a [`LocationWatcher`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WatcherConfig {
    /// Options passed through to the provider on every request.
    pub options: LocationOptions,
    /// Accuracy threshold in meters; samples at or above it are rejected.
    pub min_accuracy_threshold: f64,
    /// Accuracy EMA tuning.
    pub smoothing: SmoothingConfig,
    /// Movement baseline tuning.
    pub movement: MovementConfig,
    /// Engage great-circle movement correction on accepted samples.
    /// Off by default.
    pub movement_correction: bool,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            options: LocationOptions::default(),
            min_accuracy_threshold: 300.0,
            smoothing: SmoothingConfig::default(),
            movement: MovementConfig::default(),
            movement_correction: false,
        }
    }
}

/// Session-scoped processing state: one filter, one corrector.
///
/// Rebuilt on every watch start; left as-is after stop so the smoothed
/// accuracy stays readable.
struct SessionState {
    filter: AccuracyFilter,
    corrector: MovementCorrector,
    movement_correction: bool,
}

impl SessionState {
    fn new(config: &WatcherConfig) -> Self {
        Self {
            filter: AccuracyFilter::new(config.min_accuracy_threshold, config.smoothing),
            corrector: MovementCorrector::new(config.movement),
            movement_correction: config.movement_correction,
        }
    }

    /// Run one raw sample through the filter and, when enabled, the
    /// corrector. Returns the sample to forward, or `None` when rejected.
    fn process(&mut self, sample: PositionSample) -> Option<PositionSample> {
        match self.filter.evaluate(&sample) {
            Verdict::Rejected => None,
            Verdict::Accepted => Some(if self.movement_correction {
                self.corrector.correct(sample)
            } else {
                sample
            }),
        }
    }
}

/// Handle for the active subscription, present only while watching.
struct ActiveWatch {
    id: WatchId,
    cancellation: CancellationToken,
}

/// Coordinates a device-location watch: lifecycle, filtering, smoothing,
/// and forwarding of usable updates.
pub struct LocationWatcher {
    provider: Arc<dyn LocationProvider>,
    logger: Arc<dyn Logger>,
    config: WatcherConfig,
    session: Arc<RwLock<SessionState>>,
    active: Option<ActiveWatch>,
}

impl LocationWatcher {
    /// Create a watcher with default configuration.
    pub fn new(provider: Arc<dyn LocationProvider>, logger: Arc<dyn Logger>) -> Self {
        Self::with_config(provider, logger, WatcherConfig::default())
    }

    /// Create a watcher with custom configuration.
    pub fn with_config(
        provider: Arc<dyn LocationProvider>,
        logger: Arc<dyn Logger>,
        config: WatcherConfig,
    ) -> Self {
        let session = SessionState::new(&config);
        Self {
            provider,
            logger,
            config,
            session: Arc::new(RwLock::new(session)),
            active: None,
        }
    }

    /// Whether a subscription is currently active.
    pub fn is_watching(&self) -> bool {
        self.active.is_some()
    }

    /// Current smoothed accuracy estimate in meters.
    ///
    /// Readable at any time, including across rejections and after
    /// `stop_watch`.
    pub fn get_average_accuracy(&self) -> f64 {
        self.session.read().unwrap().filter.average_accuracy()
    }

    /// Change the accuracy rejection threshold.
    ///
    /// Applies to subsequent evaluations immediately and carries over into
    /// future watch sessions; past verdicts are not revisited.
    pub fn set_min_accuracy_threshold(&mut self, threshold: f64) {
        self.config.min_accuracy_threshold = threshold;
        self.session
            .write()
            .unwrap()
            .filter
            .set_min_accuracy_threshold(threshold);
    }

    /// Start watching the device location.
    ///
    /// Always requests one immediate single-shot fix, delivered to
    /// `on_first_fix` (or reported through the error path). If no
    /// subscription is active, resets the session state and opens one,
    /// dispatching filtered updates to `on_update`. If a subscription is
    /// already active this is a no-op for the subscription: a warning
    /// diagnostic is logged, no second subscription is opened, and the
    /// single-shot fix still occurs.
    ///
    /// Must be called from within a tokio runtime; returns before the
    /// first fix or any update arrives.
    pub fn start_watch<F, U>(&mut self, on_first_fix: F, on_update: U)
    where
        F: FnOnce(PositionSample) + Send + 'static,
        U: FnMut(PositionSample) + Send + 'static,
    {
        log_debug!(self.logger, "start_watch requested");
        self.spawn_single_fix(Box::new(on_first_fix));

        if let Some(active) = &self.active {
            log_warn!(
                self.logger,
                "start_watch called while watch {} is active; keeping existing subscription",
                active.id
            );
            return;
        }

        // Fresh filter and corrector state for the new session.
        *self.session.write().unwrap() = SessionState::new(&self.config);

        match self.provider.watch_position(&self.config.options) {
            Ok(subscription) => {
                let id = subscription.id;
                let cancellation = CancellationToken::new();
                log_debug!(self.logger, "watch {} opened", id);
                self.spawn_coordinator(subscription, cancellation.clone(), Box::new(on_update));
                self.active = Some(ActiveWatch { id, cancellation });
            }
            Err(error) => report_provider_error(self.logger.as_ref(), &error),
        }
    }

    /// Stop watching.
    ///
    /// Cancels the active subscription via the provider and clears the
    /// handle. Calling while idle is a silent no-op; the provider is never
    /// asked to cancel twice.
    pub fn stop_watch(&mut self) {
        if let Some(active) = self.active.take() {
            log_debug!(self.logger, "stop_watch: clearing watch {}", active.id);
            self.provider.clear_watch(active.id);
            active.cancellation.cancel();
        }
    }

    /// Dispatch the single-shot fix on its own task so it can interleave
    /// freely with subscription deliveries.
    fn spawn_single_fix(&self, on_first_fix: Box<dyn FnOnce(PositionSample) + Send>) {
        let reply: oneshot::Receiver<Result<PositionSample, ProviderError>> =
            self.provider.request_position(&self.config.options);
        let logger = Arc::clone(&self.logger);

        tokio::spawn(async move {
            match reply.await {
                Ok(Ok(sample)) => {
                    log_debug!(logger, "single-shot fix at {}", sample.coordinate);
                    on_first_fix(sample);
                }
                Ok(Err(error)) => report_provider_error(logger.as_ref(), &error),
                Err(_) => {
                    log_debug!(logger, "single-shot request abandoned by provider");
                }
            }
        });
    }

    /// Drive the subscription: filter each fix, forward what survives.
    fn spawn_coordinator(
        &self,
        subscription: WatchSubscription,
        cancellation: CancellationToken,
        mut on_update: Box<dyn FnMut(PositionSample) + Send>,
    ) {
        let logger = Arc::clone(&self.logger);
        let session = Arc::clone(&self.session);
        let WatchSubscription { id, mut events } = subscription;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancellation.cancelled() => {
                        log_debug!(logger, "watch {} cancelled", id);
                        break;
                    }
                    event = events.recv() => {
                        match event {
                            Some(WatchEvent::Fix(sample)) => {
                                // A fix already in flight when the watch
                                // stopped must not reach the caller.
                                if cancellation.is_cancelled() {
                                    log_debug!(logger, "watch {} cancelled", id);
                                    break;
                                }
                                let forwarded = session.write().unwrap().process(sample);
                                match forwarded {
                                    Some(update) => {
                                        log_debug!(
                                            logger,
                                            "update at {} (accuracy {:.1} m)",
                                            update.coordinate,
                                            update.accuracy_m
                                        );
                                        on_update(update);
                                    }
                                    None => log_debug!(
                                        logger,
                                        "sample rejected (accuracy {:.1} m)",
                                        sample.accuracy_m
                                    ),
                                }
                            }
                            Some(WatchEvent::Error(error)) => {
                                report_provider_error(logger.as_ref(), &error);
                            }
                            None => {
                                log_debug!(logger, "watch {} stream ended by provider", id);
                                break;
                            }
                        }
                    }
                }
            }
        });
    }
}
