//! Client side of the positions/alerts HTTP API.
mod client;
mod wire;

#[cfg(test)]
pub(crate) mod test_support;

use async_trait::async_trait;

use crate::domain::{AlertRequest, LineId, VehicleSnapshot};
use crate::error::ApiError;

pub use client::{DEFAULT_API_BASE_URL, DEFAULT_USER_AGENT, HttpTransitApi};
pub use wire::{ALERT_SUCCESS_STATUS, AlertReply, PositionRecord};

/// Backend collaborator the view polls and submits alerts to.
#[async_trait]
pub trait TransitApi: Send + Sync {
    /// Fetches the latest positions of every vehicle on `line`.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or an
    /// undecodable body.
    async fn fetch_positions(&self, line: &LineId) -> Result<VehicleSnapshot, ApiError>;

    /// Registers an arrival alert.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-2xx status or an
    /// undecodable body. A decoded reply may still report a failure status.
    async fn create_alert(&self, request: &AlertRequest) -> Result<AlertReply, ApiError>;
}
