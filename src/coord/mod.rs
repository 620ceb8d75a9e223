//! Geographic coordinate types and great-circle mathematics.
//!
//! Distances and interpolation use a spherical earth model, which is
//! accurate to well under 0.5% over the short hops a location watch
//! produces between consecutive fixes.

use std::f64::consts::PI;
use std::fmt;

/// Mean earth radius in meters (spherical model).
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Degrees to radians conversion factor.
const DEG_TO_RAD: f64 = PI / 180.0;

/// Radians to degrees conversion factor.
const RAD_TO_DEG: f64 = 180.0 / PI;

/// A latitude/longitude pair in degrees.
///
/// - Latitude: degrees north (-90 to 90)
/// - Longitude: degrees east (-180 to 180)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

impl LatLng {
    /// Create a coordinate from latitude and longitude in degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}

/// Great-circle distance between two coordinates in meters.
///
/// Haversine formula over the spherical earth model.
pub fn distance_meters(a: LatLng, b: LatLng) -> f64 {
    let lat1 = a.lat * DEG_TO_RAD;
    let lat2 = b.lat * DEG_TO_RAD;
    let dlat = (b.lat - a.lat) * DEG_TO_RAD;
    let dlon = (b.lon - a.lon) * DEG_TO_RAD;

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

/// Point at `fraction` of the way along the great-circle path from `a` to `b`.
///
/// `fraction` 0.0 yields `a`, 1.0 yields `b`. Values between interpolate
/// along the shortest path over the sphere.
///
/// # Example
///
/// ```
/// use steadywatch::coord::{distance_meters, intermediate_point, LatLng};
///
/// let a = LatLng::new(0.0, 0.0);
/// let b = LatLng::new(0.0, 1.0);
/// let mid = intermediate_point(a, b, 0.5);
/// let half = distance_meters(a, mid) / distance_meters(a, b);
/// assert!((half - 0.5).abs() < 1e-9);
/// ```
pub fn intermediate_point(a: LatLng, b: LatLng, fraction: f64) -> LatLng {
    // Angular distance between the endpoints.
    let delta = distance_meters(a, b) / EARTH_RADIUS_M;
    if delta < 1e-12 {
        // Coincident points, nothing to interpolate.
        return a;
    }

    let sin_delta = delta.sin();
    let lat1 = a.lat * DEG_TO_RAD;
    let lon1 = a.lon * DEG_TO_RAD;
    let lat2 = b.lat * DEG_TO_RAD;
    let lon2 = b.lon * DEG_TO_RAD;

    // Spherical linear interpolation on unit vectors.
    let k_a = ((1.0 - fraction) * delta).sin() / sin_delta;
    let k_b = (fraction * delta).sin() / sin_delta;

    let x = k_a * lat1.cos() * lon1.cos() + k_b * lat2.cos() * lon2.cos();
    let y = k_a * lat1.cos() * lon1.sin() + k_b * lat2.cos() * lon2.sin();
    let z = k_a * lat1.sin() + k_b * lat2.sin();

    let lat = z.atan2((x * x + y * y).sqrt());
    let lon = y.atan2(x);

    LatLng::new(lat * RAD_TO_DEG, lon * RAD_TO_DEG)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One degree of longitude at the equator in meters.
    const ONE_DEGREE_EQUATOR_M: f64 = 2.0 * PI * EARTH_RADIUS_M / 360.0;

    #[test]
    fn test_distance_zero_for_same_point() {
        let p = LatLng::new(43.6, 1.4);
        assert_eq!(distance_meters(p, p), 0.0);
    }

    #[test]
    fn test_distance_one_degree_at_equator() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.0, 1.0);
        let d = distance_meters(a, b);
        assert!((d - ONE_DEGREE_EQUATOR_M).abs() < 1.0, "got {}", d);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = LatLng::new(53.5, 10.0);
        let b = LatLng::new(53.6, 10.1);
        let ab = distance_meters(a, b);
        let ba = distance_meters(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn test_intermediate_endpoints() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(1.0, 1.0);

        let start = intermediate_point(a, b, 0.0);
        assert!(distance_meters(a, start) < 1e-3);

        let end = intermediate_point(a, b, 1.0);
        assert!(distance_meters(b, end) < 1e-3);
    }

    #[test]
    fn test_intermediate_midpoint_halves_distance() {
        let a = LatLng::new(0.0, 0.0);
        let b = LatLng::new(0.5, 0.5);
        let mid = intermediate_point(a, b, 0.5);

        let total = distance_meters(a, b);
        let to_mid = distance_meters(a, mid);
        assert!((to_mid - total / 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_intermediate_fraction_scales_distance() {
        let a = LatLng::new(10.0, 20.0);
        let b = LatLng::new(10.1, 20.1);
        let total = distance_meters(a, b);

        for fraction in [0.1, 0.25, 0.84] {
            let p = intermediate_point(a, b, fraction);
            let d = distance_meters(a, p);
            assert!(
                (d - fraction * total).abs() < 1e-6,
                "fraction {}: expected {}, got {}",
                fraction,
                fraction * total,
                d
            );
        }
    }

    #[test]
    fn test_intermediate_coincident_points() {
        let p = LatLng::new(43.6, 1.4);
        let out = intermediate_point(p, p, 0.5);
        assert_eq!(out, p);
    }

    #[test]
    fn test_latlng_display() {
        let p = LatLng::new(43.6, 1.4);
        assert_eq!(p.to_string(), "43.600000, 1.400000");
    }
}
