//! Accuracy filtering and smoothing.
//!
//! Every raw sample is accepted or rejected against a configurable
//! accuracy threshold. Accepted samples fold into an exponential moving
//! average of the accuracy signal; rejected samples penalize the average
//! instead, capped at a ceiling so a burst of bad readings cannot run it
//! away. The sample itself is never modified.

use crate::provider::PositionSample;

/// Tuning constants for the accuracy EMA.
///
/// Defaults match the documented behavior; they are exposed rather than
/// hardcoded so hosts with unusual receivers can adjust them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingConfig {
    /// Weight given to each new accepted sample; the running average keeps
    /// the complementary weight.
    pub smoothing_factor: f64,
    /// Added to the running average on every rejection.
    pub rejection_penalty: f64,
    /// Upper bound on the running average after a penalty.
    pub accuracy_ceiling: f64,
    /// Value the running average starts from in each watch session.
    pub initial_average: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.2,
            rejection_penalty: 20.0,
            accuracy_ceiling: 500.0,
            initial_average: 100.0,
        }
    }
}

/// Outcome of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The sample is usable and should be forwarded.
    Accepted,
    /// The sample is too inaccurate and must not reach the caller.
    Rejected,
}

/// Per-session accuracy filter.
///
/// State is session-scoped: the watcher constructs a fresh filter on every
/// watch start, so accuracy memory never persists across stop/start
/// cycles.
#[derive(Debug, Clone)]
pub struct AccuracyFilter {
    average_accuracy: f64,
    min_accuracy_threshold: f64,
    config: SmoothingConfig,
}

impl AccuracyFilter {
    /// Create a filter with the given rejection threshold in meters.
    pub fn new(min_accuracy_threshold: f64, config: SmoothingConfig) -> Self {
        Self {
            average_accuracy: config.initial_average,
            min_accuracy_threshold,
            config,
        }
    }

    /// Evaluate one raw sample.
    ///
    /// A sample with `accuracy_m >= threshold` is rejected and the running
    /// average takes the penalty, clamped at the ceiling. An accepted
    /// sample updates the average as
    /// `average * (1 - p) + accuracy * p` with `p` the smoothing factor.
    /// A threshold of zero therefore rejects everything, including perfect
    /// accuracy-zero readings.
    pub fn evaluate(&mut self, sample: &PositionSample) -> Verdict {
        if sample.accuracy_m >= self.min_accuracy_threshold {
            self.average_accuracy = (self.average_accuracy + self.config.rejection_penalty)
                .min(self.config.accuracy_ceiling);
            return Verdict::Rejected;
        }

        let p = self.config.smoothing_factor;
        self.average_accuracy = self.average_accuracy * (1.0 - p) + sample.accuracy_m * p;
        Verdict::Accepted
    }

    /// Current smoothed accuracy estimate in meters.
    pub fn average_accuracy(&self) -> f64 {
        self.average_accuracy
    }

    /// Current rejection threshold in meters.
    pub fn min_accuracy_threshold(&self) -> f64 {
        self.min_accuracy_threshold
    }

    /// Change the rejection threshold.
    ///
    /// Takes effect on the next evaluation; past verdicts are not
    /// revisited.
    pub fn set_min_accuracy_threshold(&mut self, threshold: f64) {
        self.min_accuracy_threshold = threshold;
    }
}
