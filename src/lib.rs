//! delivery-route-planner core
//!
//! Nearest-neighbor ordering of delivery stops around a depot, plus the
//! in-memory registry that owns those stops for a session.

pub mod error;
pub mod geo;
pub mod traits;
pub mod haversine;
pub mod optimizer;
pub mod registry;
pub mod geocode;
pub mod polyline;

pub use error::{Error, Result};
pub use geo::{distance_km, GeoPoint};
pub use optimizer::{optimize, Route, RouteOptimizer};
pub use registry::{DeliveryRegistry, RegistryEvent, Stop, StopId, StopMetadata};
