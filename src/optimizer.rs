//! Delivery route optimizer (greedy nearest-neighbor).
//!
//! Starting at the depot, always drive to the closest stop not yet visited.
//! This is a heuristic, not an exact TSP solver, and no improvement pass
//! (2-opt, relocate) is run afterwards. O(n²) in the number of stops.

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::haversine::{self, Haversine};
use crate::polyline::Polyline;
use crate::traits::{DistanceMetric, Waypoint};

/// An ordered visit of stops, borrowed from the optimizer's input.
#[derive(Debug, Clone, Serialize)]
pub struct Route<'a, W> {
    depot: Option<GeoPoint>,
    order: Vec<&'a W>,
    legs_km: Vec<f64>,
    total_distance_km: f64,
}

impl<'a, W: Waypoint> Route<'a, W> {
    fn empty(depot: Option<GeoPoint>) -> Self {
        Self {
            depot,
            order: Vec::new(),
            legs_km: Vec::new(),
            total_distance_km: 0.0,
        }
    }

    pub fn depot(&self) -> Option<GeoPoint> {
        self.depot
    }

    /// Stops in visiting order.
    pub fn stops(&self) -> &[&'a W] {
        &self.order
    }

    pub fn into_stops(self) -> Vec<&'a W> {
        self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Total path length in kilometers, depot included. Sum of [`Route::legs_km`].
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Length of every leg under the optimizer's metric, starting with depot
    /// to first stop.
    pub fn legs_km(&self) -> &[f64] {
        &self.legs_km
    }

    /// Rough driving time for the whole route at `speed_kmh`, or `None` when
    /// the total does not fit in an `i32` number of seconds (including NaN).
    pub fn estimated_travel_secs(&self, speed_kmh: f64) -> Option<i32> {
        haversine::travel_secs(self.total_distance_km, speed_kmh)
    }

    /// Path geometry: the depot followed by each stop. Empty when there are no stops.
    pub fn path(&self) -> Polyline {
        match self.depot {
            Some(depot) if !self.order.is_empty() => std::iter::once(depot)
                .chain(self.order.iter().map(|stop| stop.location()))
                .collect(),
            _ => Polyline::default(),
        }
    }
}

/// Orders stops by repeatedly visiting the nearest unvisited one.
#[derive(Debug, Clone, Default)]
pub struct RouteOptimizer<M = Haversine> {
    metric: M,
}

impl RouteOptimizer<Haversine> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: DistanceMetric> RouteOptimizer<M> {
    pub fn with_metric(metric: M) -> Self {
        Self { metric }
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Build a route from `depot` through every stop.
    ///
    /// An empty stop list yields an empty route. A missing depot with stops
    /// present is rejected with [`Error::InvalidInput`]. Equidistant
    /// candidates are resolved in favor of the one listed first. Stops with
    /// NaN coordinates produce an unspecified order and a NaN total.
    pub fn optimize<'a, W: Waypoint>(
        &self,
        depot: Option<GeoPoint>,
        stops: &'a [W],
    ) -> Result<Route<'a, W>> {
        if stops.is_empty() {
            return Ok(Route::empty(depot));
        }

        let depot = depot.ok_or_else(|| {
            Error::invalid_input(format!(
                "depot is required to route {} stop(s)",
                stops.len()
            ))
        })?;

        // Vec::remove keeps the remaining candidates in input order,
        // which the tie-break relies on.
        let mut unvisited: Vec<&'a W> = stops.iter().collect();
        let mut order = Vec::with_capacity(stops.len());
        let mut current = depot;

        while !unvisited.is_empty() {
            let mut best_index = 0;
            let mut best_distance = self.metric.distance_km(current, unvisited[0].location());

            for (index, stop) in unvisited.iter().enumerate().skip(1) {
                let distance = self.metric.distance_km(current, stop.location());
                if distance < best_distance {
                    best_index = index;
                    best_distance = distance;
                }
            }

            let next = unvisited.remove(best_index);
            current = next.location();
            order.push(next);
        }

        let legs_km = path_legs_km(&self.metric, depot, &order);
        let total_distance_km: f64 = legs_km.iter().sum();

        debug!(
            stops = order.len(),
            total_distance_km, "optimized delivery route"
        );

        Ok(Route {
            depot: Some(depot),
            order,
            legs_km,
            total_distance_km,
        })
    }
}

/// Metric distance of each leg along depot -> stops[0] -> .. -> stops[n-1].
fn path_legs_km<M, W>(metric: &M, depot: GeoPoint, stops: &[W]) -> Vec<f64>
where
    M: DistanceMetric,
    W: Waypoint,
{
    let mut previous = depot;
    stops
        .iter()
        .map(|stop| {
            let location = stop.location();
            let leg = metric.distance_km(previous, location);
            previous = location;
            leg
        })
        .collect()
}

/// Route through `stops` with haversine distances.
pub fn optimize<'a, W: Waypoint>(depot: Option<GeoPoint>, stops: &'a [W]) -> Result<Route<'a, W>> {
    RouteOptimizer::new().optimize(depot, stops)
}

/// Haversine length of an arbitrary visiting order, depot first.
pub fn route_distance_km<W: Waypoint>(depot: GeoPoint, stops: &[W]) -> f64 {
    path_legs_km(&Haversine::default(), depot, stops).iter().sum()
}
