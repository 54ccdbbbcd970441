//! Marker overlays drawn on the [`MapSurface`](crate::map::MapSurface).
//!
//! Vehicle markers and the start-point marker are disjoint: each overlay only
//! ever releases handles it placed itself.
mod start_point;
mod vehicles;

pub use start_point::{START_POINT_LABEL, StartPointSelector};
pub use vehicles::{VehicleMarkers, reconcile};
