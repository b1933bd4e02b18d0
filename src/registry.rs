//! In-memory registry of delivery stops.
//!
//! The registry owns the canonical stop order for a session. Callers route
//! over a snapshot from [`DeliveryRegistry::all`] and commit the result
//! with [`DeliveryRegistry::replace_order`], which re-validates that the
//! snapshot still matches the registry.

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;
use crate::traits::{Geocoder, Waypoint};

/// Identifier assigned to a stop by its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct StopId(u64);

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stop-{}", self.0)
    }
}

/// Display data carried alongside a stop.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopMetadata {
    pub label: Option<String>,
    pub address: Option<String>,
}

impl StopMetadata {
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            address: None,
        }
    }
}

/// A single delivery target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    id: StopId,
    location: GeoPoint,
    completed: bool,
    metadata: StopMetadata,
}

impl Stop {
    pub fn id(&self) -> StopId {
        self.id
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn metadata(&self) -> &StopMetadata {
        &self.metadata
    }
}

impl Waypoint for Stop {
    fn location(&self) -> GeoPoint {
        self.location
    }
}

/// A mutation that has been applied to the registry.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryEvent {
    Added(Stop),
    Removed(StopId),
    Toggled(Stop),
    Reordered,
    Cleared,
}

/// Handle returned by [`DeliveryRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Observer = Box<dyn FnMut(&RegistryEvent)>;

/// Ordered collection of stops with completion state.
///
/// Observers are invoked synchronously after every successful mutation. A
/// panicking observer is logged and skipped; it neither blocks the remaining
/// observers nor rolls back the mutation.
#[derive(Default)]
pub struct DeliveryRegistry {
    stops: Vec<Stop>,
    next_stop_id: u64,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription_id: u64,
}

impl fmt::Debug for DeliveryRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeliveryRegistry")
            .field("stops", &self.stops)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl DeliveryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new, not yet completed stop.
    pub fn add(&mut self, location: GeoPoint, metadata: StopMetadata) -> Stop {
        let id = StopId(self.next_stop_id);
        self.next_stop_id += 1;

        let stop = Stop {
            id,
            location,
            completed: false,
            metadata,
        };
        self.stops.push(stop.clone());
        debug!(%id, latitude = location.latitude, longitude = location.longitude, "added stop");

        self.notify(RegistryEvent::Added(stop.clone()));
        stop
    }

    /// Geocode `address` and add the result as a stop.
    ///
    /// No stop is created when the geocoder has no match.
    pub fn add_geocoded<G: Geocoder>(
        &mut self,
        geocoder: &G,
        address: &str,
        label: Option<String>,
    ) -> Result<Option<Stop>> {
        let Some(location) = geocoder.geocode(address)? else {
            debug!(address, "no geocoding match, stop not created");
            return Ok(None);
        };

        let metadata = StopMetadata {
            label,
            address: Some(address.to_string()),
        };
        Ok(Some(self.add(location, metadata)))
    }

    /// Remove a stop. Unknown ids are ignored.
    pub fn remove(&mut self, id: StopId) {
        let Some(index) = self.position(id) else {
            debug!(%id, "remove of unknown stop ignored");
            return;
        };

        self.stops.remove(index);
        debug!(%id, "removed stop");
        self.notify(RegistryEvent::Removed(id));
    }

    /// Flip the completion flag of a stop and return its new state.
    pub fn toggle_completed(&mut self, id: StopId) -> Result<Stop> {
        let index = self.position(id).ok_or(Error::NotFound(id))?;

        let stop = &mut self.stops[index];
        stop.completed = !stop.completed;
        let stop = stop.clone();
        debug!(%id, completed = stop.completed, "toggled stop");

        self.notify(RegistryEvent::Toggled(stop.clone()));
        Ok(stop)
    }

    pub fn clear(&mut self) {
        let removed = self.stops.len();
        self.stops.clear();
        debug!(removed, "cleared stops");
        self.notify(RegistryEvent::Cleared);
    }

    /// Commit a new visiting order.
    ///
    /// `new_order` must hold exactly the ids currently registered, each
    /// once. Otherwise the registry is left untouched. The registry's own
    /// copy of each stop is kept, so state changed since the snapshot
    /// (e.g. completion) survives the reorder.
    pub fn replace_order<S: Borrow<Stop>>(&mut self, new_order: &[S]) -> Result<()> {
        if new_order.len() != self.stops.len() {
            return Err(Error::invalid_order(format!(
                "expected {} stops, got {}",
                self.stops.len(),
                new_order.len()
            )));
        }

        let mut seen = HashSet::with_capacity(new_order.len());
        for stop in new_order {
            let id = Borrow::<Stop>::borrow(stop).id;
            if !seen.insert(id) {
                return Err(Error::invalid_order(format!("{id} appears more than once")));
            }
            if self.position(id).is_none() {
                return Err(Error::invalid_order(format!("{id} is not registered")));
            }
        }

        let mut current: HashMap<StopId, Stop> =
            self.stops.drain(..).map(|stop| (stop.id, stop)).collect();
        self.stops = new_order
            .iter()
            .filter_map(|stop| current.remove(&Borrow::<Stop>::borrow(stop).id))
            .collect();
        debug!(stops = self.stops.len(), "replaced stop order");

        self.notify(RegistryEvent::Reordered);
        Ok(())
    }

    /// Snapshot of the stops in their current order.
    pub fn all(&self) -> Vec<Stop> {
        self.stops.clone()
    }

    pub fn get(&self, id: StopId) -> Option<&Stop> {
        self.stops.iter().find(|stop| stop.id == id)
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.stops.iter().filter(|stop| stop.completed).count()
    }

    pub fn pending_count(&self) -> usize {
        self.len() - self.completed_count()
    }

    /// Register a callback for successful mutations.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&RegistryEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription_id);
        self.next_subscription_id += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(subscription, _)| *subscription != id);
        self.observers.len() != before
    }

    fn position(&self, id: StopId) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == id)
    }

    fn notify(&mut self, event: RegistryEvent) {
        for (id, observer) in self.observers.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| observer(&event)));
            if outcome.is_err() {
                warn!(subscription = id.0, ?event, "registry observer panicked");
            }
        }
    }
}
