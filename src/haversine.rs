//! Haversine distance metric.
//!
//! Uses great-circle distance between stops and an assumed speed to
//! estimate travel time. Ignores roads, but needs no network.

use crate::geo::{self, GeoPoint};
use crate::traits::DistanceMetric;

/// Average driving speed assumption for time estimation.
const DEFAULT_SPEED_KMH: f64 = 40.0;

/// Haversine-based distance metric.
#[derive(Debug, Clone)]
pub struct Haversine {
    /// Assumed average driving speed in km/h.
    pub speed_kmh: f64,
}

impl Default for Haversine {
    fn default() -> Self {
        Self {
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

impl Haversine {
    pub fn new(speed_kmh: f64) -> Self {
        Self { speed_kmh }
    }

    /// Convert distance in km to travel time in seconds.
    pub fn km_to_seconds(&self, km: f64) -> Option<i32> {
        travel_secs(km, self.speed_kmh)
    }
}

/// Travel time in whole seconds for `km` at `speed_kmh`.
///
/// Returns `None` for NaN or infinite results and for times that do not fit
/// in an `i32`, instead of letting the cast saturate.
pub fn travel_secs(km: f64, speed_kmh: f64) -> Option<i32> {
    let seconds = (km / speed_kmh * 3600.0).round();
    if seconds.is_finite() && seconds >= i32::MIN as f64 && seconds <= i32::MAX as f64 {
        Some(seconds as i32)
    } else {
        None
    }
}

impl DistanceMetric for Haversine {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64 {
        geo::distance_km(from, to)
    }
}
