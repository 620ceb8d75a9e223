//! Great-circle movement correction.
//!
//! Dampens GPS-class positional jitter: when a new fix jumps farther than
//! the smoothed "typical distance moved" baseline, the reported coordinate
//! is pulled back along the great-circle path toward that baseline. When
//! movement genuinely slows, the baseline snaps down immediately so the
//! corrector does not keep dragging positions forward.
//!
//! This path is opt-in; the default pipeline forwards accepted samples
//! untouched (see [`WatcherConfig::movement_correction`]).
//!
//! [`WatcherConfig::movement_correction`]: crate::watcher::WatcherConfig

use crate::coord::{self, LatLng};
use crate::provider::PositionSample;

/// Tuning for the movement baseline EMA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementConfig {
    /// Weight given to each new observed distance when the jump meets or
    /// exceeds the baseline.
    pub smoothing_factor: f64,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            smoothing_factor: 0.8,
        }
    }
}

/// Per-session movement corrector.
///
/// Like the accuracy filter, state is session-scoped and rebuilt on every
/// watch start.
#[derive(Debug, Clone)]
pub struct MovementCorrector {
    last_coordinate: Option<LatLng>,
    average_distance_m: f64,
    config: MovementConfig,
}

impl MovementCorrector {
    /// Create a corrector with no movement history.
    pub fn new(config: MovementConfig) -> Self {
        Self {
            last_coordinate: None,
            average_distance_m: 0.0,
            config,
        }
    }

    /// Correct one accepted sample.
    ///
    /// The first sample of a session only seeds the previous coordinate.
    /// Afterwards, a jump of distance `d >= baseline` folds `d` into the
    /// baseline and returns the point at fraction `baseline / d` along the
    /// great-circle path from the previous coordinate toward the raw one;
    /// a shorter jump resets the baseline to `d` and passes the sample
    /// through. The previous coordinate always advances to the raw
    /// coordinate, so successive corrections chain from actual samples,
    /// not corrected ones.
    pub fn correct(&mut self, sample: PositionSample) -> PositionSample {
        let raw = sample.coordinate;

        let Some(last) = self.last_coordinate else {
            self.last_coordinate = Some(raw);
            return sample;
        };

        let distance = coord::distance_meters(last, raw);

        let corrected = if distance >= self.average_distance_m && distance > 0.0 {
            let p = self.config.smoothing_factor;
            self.average_distance_m = self.average_distance_m * (1.0 - p) + distance * p;

            let fraction = self.average_distance_m / distance;
            sample.with_coordinate(coord::intermediate_point(last, raw, fraction))
        } else {
            // Sudden deceleration: track the shorter distance directly.
            self.average_distance_m = distance;
            sample
        };

        self.last_coordinate = Some(raw);
        corrected
    }

    /// Smoothed typical distance moved between fixes, in meters.
    pub fn average_distance_m(&self) -> f64 {
        self.average_distance_m
    }

    /// Coordinate of the last raw sample seen this session, if any.
    pub fn last_coordinate(&self) -> Option<LatLng> {
        self.last_coordinate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::distance_meters;

    const EARTH_RADIUS_M: f64 = 6_371_000.0;

    /// A point `meters` due north of the equatorial origin.
    fn north_of_origin(meters: f64) -> LatLng {
        LatLng::new((meters / EARTH_RADIUS_M).to_degrees(), 0.0)
    }

    fn sample_at(coordinate: LatLng) -> PositionSample {
        PositionSample::new(coordinate.lat, coordinate.lon, 10.0)
    }

    #[test]
    fn test_first_sample_passes_through() {
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        let sample = sample_at(LatLng::new(43.6, 1.4));

        let out = corrector.correct(sample);

        assert_eq!(out, sample);
        assert_eq!(corrector.last_coordinate(), Some(sample.coordinate));
        assert_eq!(corrector.average_distance_m(), 0.0);
    }

    #[test]
    fn test_large_jump_interpolated_along_great_circle() {
        // Baseline 10 m, new fix ~50 m away: baseline becomes
        // 0.2 * 10 + 0.8 * 50 = 42, corrected point sits at fraction
        // 42 / 50 = 0.84 of the path.
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        corrector.last_coordinate = Some(LatLng::new(0.0, 0.0));
        corrector.average_distance_m = 10.0;

        let raw = north_of_origin(50.0);
        let d = distance_meters(LatLng::new(0.0, 0.0), raw);
        assert!((d - 50.0).abs() < 1e-6);

        let out = corrector.correct(sample_at(raw));

        assert!((corrector.average_distance_m() - 42.0).abs() < 1e-6);

        let corrected_distance = distance_meters(LatLng::new(0.0, 0.0), out.coordinate);
        assert!(
            (corrected_distance - 0.84 * d).abs() < 1e-6,
            "expected {}, got {}",
            0.84 * d,
            corrected_distance
        );

        // Metadata untouched.
        assert_eq!(out.accuracy_m, 10.0);
    }

    #[test]
    fn test_deceleration_snaps_baseline_down() {
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        corrector.last_coordinate = Some(LatLng::new(0.0, 0.0));
        corrector.average_distance_m = 100.0;

        let raw = north_of_origin(5.0);
        let out = corrector.correct(sample_at(raw));

        // No smoothing on the way down, and no correction applied.
        assert!((corrector.average_distance_m() - 5.0).abs() < 1e-6);
        assert_eq!(out.coordinate, raw);
    }

    #[test]
    fn test_last_coordinate_tracks_raw_not_corrected() {
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        corrector.last_coordinate = Some(LatLng::new(0.0, 0.0));
        corrector.average_distance_m = 10.0;

        let raw = north_of_origin(50.0);
        let out = corrector.correct(sample_at(raw));

        assert_ne!(out.coordinate, raw);
        assert_eq!(corrector.last_coordinate(), Some(raw));
    }

    #[test]
    fn test_stationary_fix_resets_baseline_to_zero() {
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        let origin = LatLng::new(0.0, 0.0);
        corrector.last_coordinate = Some(origin);
        corrector.average_distance_m = 30.0;

        let out = corrector.correct(sample_at(origin));

        assert_eq!(corrector.average_distance_m(), 0.0);
        assert_eq!(out.coordinate, origin);
    }

    #[test]
    fn test_baseline_grows_from_zero() {
        // Fresh session: the first measured jump seeds the baseline at
        // 0.8 of its distance.
        let mut corrector = MovementCorrector::new(MovementConfig::default());
        corrector.correct(sample_at(LatLng::new(0.0, 0.0)));
        corrector.correct(sample_at(north_of_origin(20.0)));

        assert!((corrector.average_distance_m() - 16.0).abs() < 1e-6);
    }
}
