use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::domain::Coordinate;

use super::{ClickSender, MapSurface, MapView, MarkerSpec, TileLayer};

/// Handle for a marker placed on a [`ConsoleSurface`].
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConsoleMarker(u64);

impl ConsoleMarker {
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.0
    }
}

/// Forwards clicks typed at the terminal to whichever listener the surface
/// registered.
#[derive(Debug, Clone, Default)]
pub struct ClickRelay {
    listener: Arc<Mutex<Option<ClickSender>>>,
}

impl ClickRelay {
    /// Returns `false` when no listener is registered or it has gone away.
    pub fn click(&self, coordinate: Coordinate) -> bool {
        let Ok(guard) = self.listener.lock() else {
            return false;
        };
        guard
            .as_ref()
            .is_some_and(|listener| listener.send(coordinate).is_ok())
    }

    fn register(&self, listener: ClickSender) {
        match self.listener.lock() {
            Ok(mut guard) => *guard = Some(listener),
            Err(err) => warn!("Click relay lock poisoned: {}", err),
        }
    }
}

/// Headless surface: every operation is traced instead of drawn.
#[derive(Debug, Default)]
pub struct ConsoleSurface {
    view: Option<MapView>,
    next_id: u64,
    live_markers: usize,
    relay: ClickRelay,
}

impl ConsoleSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn click_relay(&self) -> ClickRelay {
        self.relay.clone()
    }

    #[must_use]
    pub const fn live_markers(&self) -> usize {
        self.live_markers
    }

    #[must_use]
    pub const fn view(&self) -> Option<MapView> {
        self.view
    }
}

impl MapSurface for ConsoleSurface {
    type Marker = ConsoleMarker;

    fn initialize(&mut self, view: MapView) {
        info!(
            "Map centered at {:.4},{:.4} (zoom {})",
            view.center.lat, view.center.lng, view.zoom
        );
        self.view = Some(view);
    }

    fn add_tile_layer(&mut self, layer: &TileLayer) {
        debug!("Tile layer {}", layer.url_template);
    }

    fn register_click_listener(&mut self, listener: ClickSender) {
        self.relay.register(listener);
    }

    fn place_marker(&mut self, spec: MarkerSpec) -> ConsoleMarker {
        self.next_id = self.next_id.saturating_add(1);
        self.live_markers = self.live_markers.saturating_add(1);
        debug!(
            marker = self.next_id,
            "Placed '{}' at {:.5},{:.5}", spec.label, spec.position.lat, spec.position.lng
        );
        ConsoleMarker(self.next_id)
    }

    fn remove_marker(&mut self, marker: ConsoleMarker) {
        self.live_markers = self.live_markers.saturating_sub(1);
        debug!(marker = marker.id(), "Removed marker");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::{BUS_ICON, MapSurface, MarkerSpec};
    use tokio::sync::mpsc;

    fn spec() -> MarkerSpec {
        MarkerSpec {
            position: Coordinate::new(-22.9, -43.2),
            icon: BUS_ICON,
            label: "A1 / 35 km/h".to_owned(),
        }
    }

    #[test]
    fn markers_are_counted_until_removed() -> Result<(), String> {
        let mut surface = ConsoleSurface::new();
        let first = surface.place_marker(spec());
        let second = surface.place_marker(spec());
        if first == second {
            return Err("Expected distinct marker ids".to_owned());
        }
        surface.remove_marker(first);
        if surface.live_markers() != 1 {
            return Err(format!("Expected 1 live marker, got {}", surface.live_markers()));
        }
        surface.remove_marker(second);
        if surface.live_markers() != 0 {
            return Err(format!("Expected 0 live markers, got {}", surface.live_markers()));
        }
        Ok(())
    }

    #[test]
    fn relay_forwards_clicks_to_registered_listener() -> Result<(), String> {
        let mut surface = ConsoleSurface::new();
        let relay = surface.click_relay();
        if relay.click(Coordinate::new(0.0, 0.0)) {
            return Err("Click should not be delivered without a listener".to_owned());
        }

        let (tx, mut rx) = mpsc::unbounded_channel();
        surface.register_click_listener(tx);
        if !relay.click(Coordinate::new(-22.95, -43.18)) {
            return Err("Expected click to be delivered".to_owned());
        }
        let received = rx.try_recv().map_err(|err| format!("No click: {}", err))?;
        if received != Coordinate::new(-22.95, -43.18) {
            return Err(format!("Unexpected click {:?}", received));
        }
        Ok(())
    }
}
