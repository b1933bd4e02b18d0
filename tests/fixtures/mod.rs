//! Test fixtures for delivery-route-planner.
//!
//! Provides real Las Vegas coordinates (from OpenStreetMap) for a depot and
//! a handful of collection points along the Strip.

pub mod collection_points;

pub use collection_points::*;
