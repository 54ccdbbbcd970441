use std::collections::BTreeMap;

use crate::domain::Coordinate;

use super::{ClickSender, MapSurface, MapView, MarkerSpec, TileLayer};

/// Fake surface that remembers every live marker by handle id.
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub(crate) view: Option<MapView>,
    pub(crate) tile_layers: usize,
    pub(crate) listener: Option<ClickSender>,
    pub(crate) live: BTreeMap<u64, MarkerSpec>,
    pub(crate) placed: usize,
    pub(crate) removed: usize,
    next_id: u64,
}

impl RecordingSurface {
    pub(crate) fn labels(&self) -> Vec<String> {
        self.live.values().map(|spec| spec.label.clone()).collect()
    }

    pub(crate) fn positions(&self) -> Vec<Coordinate> {
        self.live.values().map(|spec| spec.position).collect()
    }
}

impl MapSurface for RecordingSurface {
    type Marker = u64;

    fn initialize(&mut self, view: MapView) {
        self.view = Some(view);
    }

    fn add_tile_layer(&mut self, _layer: &TileLayer) {
        self.tile_layers = self.tile_layers.saturating_add(1);
    }

    fn register_click_listener(&mut self, listener: ClickSender) {
        self.listener = Some(listener);
    }

    fn place_marker(&mut self, spec: MarkerSpec) -> u64 {
        self.next_id = self.next_id.saturating_add(1);
        self.placed = self.placed.saturating_add(1);
        self.live.insert(self.next_id, spec);
        self.next_id
    }

    fn remove_marker(&mut self, marker: u64) {
        self.removed = self.removed.saturating_add(1);
        self.live.remove(&marker);
    }
}
