use serde::{Deserialize, Deserializer};

use crate::domain::VehiclePosition;

/// `status` value the alerts endpoint uses for a stored alert.
pub const ALERT_SUCCESS_STATUS: &str = "sucesso";

/// One element of `GET /api/v1/posicoes/{line}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PositionRecord {
    #[serde(rename = "ordem")]
    pub identity: String,
    #[serde(deserialize_with = "decimal")]
    pub latitude: f64,
    #[serde(deserialize_with = "decimal")]
    pub longitude: f64,
    #[serde(rename = "velocidade", default, deserialize_with = "decimal")]
    pub speed_kmh: f64,
    #[serde(rename = "hora_atualizacao", default)]
    pub updated_at: String,
    #[serde(rename = "linha", default)]
    pub line: Option<String>,
}

impl From<PositionRecord> for VehiclePosition {
    fn from(record: PositionRecord) -> Self {
        let speed_kmh = if record.speed_kmh.is_finite() && record.speed_kmh > 0.0 {
            record.speed_kmh
        } else {
            0.0
        };
        Self {
            identity: record.identity,
            latitude: record.latitude,
            longitude: record.longitude,
            speed_kmh,
            updated_at: record.updated_at,
        }
    }
}

/// Reply of `POST /api/v1/alertas`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AlertReply {
    pub status: String,
    #[serde(rename = "mensagem", default)]
    pub message: Option<String>,
}

impl AlertReply {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ALERT_SUCCESS_STATUS
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Decimal {
    Number(f64),
    Text(String),
}

/// Accepts JSON numbers as well as strings such as `"-22,90672"`.
fn decimal<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Decimal::deserialize(deserializer)? {
        Decimal::Number(value) => Ok(value),
        Decimal::Text(text) => text
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(serde::de::Error::custom),
    }
}
