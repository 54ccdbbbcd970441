//! Map surface capability.
//!
//! The overlay layer never talks to a rendering backend directly; it places and
//! removes markers through [`MapSurface`], so tests can swap in a recording fake
//! and the terminal host can use [`ConsoleSurface`].
mod console;

#[cfg(test)]
pub(crate) mod test_support;

use tokio::sync::mpsc;

use crate::domain::Coordinate;

pub use console::{ClickRelay, ConsoleMarker, ConsoleSurface};

/// Channel end the surface pushes click coordinates into.
pub type ClickSender = mpsc::UnboundedSender<Coordinate>;
pub type ClickReceiver = mpsc::UnboundedReceiver<Coordinate>;

/// Rio de Janeiro city center.
pub const DEFAULT_CENTER: Coordinate = Coordinate::new(-22.9068, -43.1729);
pub const DEFAULT_ZOOM: u8 = 12;
pub const MAX_ZOOM: u8 = 19;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileLayer {
    pub url_template: &'static str,
    pub attribution: &'static str,
}

pub const OSM_TILES: TileLayer = TileLayer {
    url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
    attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
};

/// Marker image with its pixel size and anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerIcon {
    pub url: &'static str,
    pub size: (u32, u32),
    pub anchor: (i32, i32),
    pub popup_anchor: (i32, i32),
}

pub const BUS_ICON: MarkerIcon = MarkerIcon {
    url: "https://cdn-icons-png.flaticon.com/512/3448/3448624.png",
    size: (35, 35),
    anchor: (17, 35),
    popup_anchor: (0, -35),
};

pub const START_POINT_ICON: MarkerIcon = MarkerIcon {
    url: "https://cdn-icons-png.flaticon.com/512/684/684908.png",
    size: (40, 40),
    anchor: (20, 40),
    popup_anchor: (0, -40),
};

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: Coordinate,
    pub icon: MarkerIcon,
    pub label: String,
}

/// Interactive map the overlays draw on.
///
/// Marker handles are owned by whoever placed them and are consumed on
/// removal, so a handle can only ever be released once.
pub trait MapSurface {
    type Marker;

    fn initialize(&mut self, view: MapView);
    fn add_tile_layer(&mut self, layer: &TileLayer);
    fn register_click_listener(&mut self, listener: ClickSender);
    fn place_marker(&mut self, spec: MarkerSpec) -> Self::Marker;
    fn remove_marker(&mut self, marker: Self::Marker);
}
