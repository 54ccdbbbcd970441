use serde::Serialize;

use super::{Coordinate, LineId};

/// Body of `POST /api/v1/alertas`.
///
/// Only built once email, line and start point are all present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRequest {
    pub email: String,
    #[serde(rename = "linha")]
    pub line: LineId,
    #[serde(rename = "latitude_ponto")]
    pub latitude: f64,
    #[serde(rename = "longitude_ponto")]
    pub longitude: f64,
}

impl AlertRequest {
    #[must_use]
    pub fn new(email: String, line: LineId, start_point: Coordinate) -> Self {
        Self {
            email,
            line,
            latitude: start_point.lat,
            longitude: start_point.lng,
        }
    }
}
