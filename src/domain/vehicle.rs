use std::fmt;

use serde::Serialize;

use super::Coordinate;

/// Transit route identifier as typed by the user (e.g. "483").
///
/// Always trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct LineId(String);

impl LineId {
    /// Returns `None` when the input is blank.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One vehicle as of the latest refresh.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehiclePosition {
    /// Fleet number, unique within a snapshot.
    pub identity: String,
    pub latitude: f64,
    pub longitude: f64,
    pub speed_kmh: f64,
    pub updated_at: String,
}

impl VehiclePosition {
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Speed rounded to whole km/h, as displayed on labels and tables.
    #[must_use]
    pub fn rounded_speed(&self) -> f64 {
        self.speed_kmh.round()
    }

    /// Marker label: `"{identity} / {speed} km/h"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} / {} km/h", self.identity, self.rounded_speed())
    }
}

/// Every vehicle returned by one successful poll, in server order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct VehicleSnapshot {
    vehicles: Vec<VehiclePosition>,
}

impl VehicleSnapshot {
    #[must_use]
    pub const fn new(vehicles: Vec<VehiclePosition>) -> Self {
        Self { vehicles }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self {
            vehicles: Vec::new(),
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, VehiclePosition> {
        self.vehicles.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[VehiclePosition] {
        &self.vehicles
    }
}

impl From<Vec<VehiclePosition>> for VehicleSnapshot {
    fn from(vehicles: Vec<VehiclePosition>) -> Self {
        Self::new(vehicles)
    }
}

impl<'snapshot> IntoIterator for &'snapshot VehicleSnapshot {
    type Item = &'snapshot VehiclePosition;
    type IntoIter = std::slice::Iter<'snapshot, VehiclePosition>;

    fn into_iter(self) -> Self::IntoIter {
        self.vehicles.iter()
    }
}
