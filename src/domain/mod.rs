//! Plain data shared by the overlay, polling and alert layers.
mod alert;
mod geo;
mod vehicle;

pub use alert::AlertRequest;
pub use geo::Coordinate;
pub use vehicle::{LineId, VehiclePosition, VehicleSnapshot};
