use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::domain::VehicleSnapshot;
use crate::map::{BUS_ICON, MapSurface, MarkerSpec};

/// Replaces `previous` with one fresh marker per vehicle in `snapshot`.
///
/// Every previous marker is released first, so nothing outlives the snapshot
/// that produced it and labels never show stale speeds. When an identity
/// repeats inside the snapshot the last entry wins and the earlier marker is
/// released on the spot.
pub fn reconcile<S>(
    surface: &mut S,
    previous: BTreeMap<String, S::Marker>,
    snapshot: &VehicleSnapshot,
) -> BTreeMap<String, S::Marker>
where
    S: MapSurface,
{
    for marker in previous.into_values() {
        surface.remove_marker(marker);
    }

    let mut current = BTreeMap::new();
    for vehicle in snapshot {
        let marker = surface.place_marker(MarkerSpec {
            position: vehicle.coordinate(),
            icon: BUS_ICON,
            label: vehicle.label(),
        });
        if let Some(duplicate) = current.insert(vehicle.identity.clone(), marker) {
            warn!(
                "Vehicle '{}' appears more than once in snapshot; keeping the last position.",
                vehicle.identity
            );
            surface.remove_marker(duplicate);
        }
    }
    current
}

/// Vehicle identity to marker handle, rebuilt on every published snapshot.
#[derive(Debug)]
pub struct VehicleMarkers<M> {
    markers: BTreeMap<String, M>,
}

impl<M> Default for VehicleMarkers<M> {
    fn default() -> Self {
        Self {
            markers: BTreeMap::new(),
        }
    }
}

impl<M> VehicleMarkers<M> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply<S>(&mut self, surface: &mut S, snapshot: &VehicleSnapshot)
    where
        S: MapSurface<Marker = M>,
    {
        let previous = std::mem::take(&mut self.markers);
        let released = previous.len();
        self.markers = reconcile(surface, previous, snapshot);
        debug!(
            released,
            placed = self.markers.len(),
            "Vehicle markers rebuilt"
        );
    }

    /// Releases every vehicle marker.
    pub fn clear<S>(&mut self, surface: &mut S)
    where
        S: MapSurface<Marker = M>,
    {
        for marker in std::mem::take(&mut self.markers).into_values() {
            surface.remove_marker(marker);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    #[must_use]
    pub fn contains(&self, identity: &str) -> bool {
        self.markers.contains_key(identity)
    }
}
