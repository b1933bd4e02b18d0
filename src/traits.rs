//! Core seams for the route planner.
//!
//! These are intentionally minimal. Concrete apps implement them for their
//! own data models; the crate ships implementations for its own types.

use crate::error::Result;
use crate::geo::GeoPoint;

/// Something the optimizer can route through.
pub trait Waypoint {
    /// Location of the waypoint.
    fn location(&self) -> GeoPoint;
}

impl Waypoint for GeoPoint {
    fn location(&self) -> GeoPoint {
        *self
    }
}

impl<W: Waypoint + ?Sized> Waypoint for &W {
    fn location(&self) -> GeoPoint {
        (**self).location()
    }
}

/// Distance between two points, in kilometers.
pub trait DistanceMetric {
    fn distance_km(&self, from: GeoPoint, to: GeoPoint) -> f64;
}

/// Resolves free-text addresses into coordinates.
pub trait Geocoder {
    /// Returns `Ok(None)` when the address has no match.
    fn geocode(&self, address: &str) -> Result<Option<GeoPoint>>;
}
