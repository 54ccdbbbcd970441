use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{AlertRequest, LineId, VehiclePosition, VehicleSnapshot};
use crate::error::ApiError;

use super::{ALERT_SUCCESS_STATUS, AlertReply, TransitApi};

/// Scripted API: per-line positions or a failing status, one alert reply.
#[derive(Debug)]
pub(crate) struct FakeApi {
    positions: Mutex<BTreeMap<String, Result<Vec<VehiclePosition>, u16>>>,
    alert_reply: Mutex<Result<AlertReply, u16>>,
    pub(crate) position_calls: Mutex<Vec<String>>,
    pub(crate) alert_calls: Mutex<Vec<AlertRequest>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            positions: Mutex::new(BTreeMap::new()),
            alert_reply: Mutex::new(Ok(AlertReply {
                status: ALERT_SUCCESS_STATUS.to_owned(),
                message: None,
            })),
            position_calls: Mutex::new(Vec::new()),
            alert_calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub(crate) fn with_positions(self, line: &str, vehicles: Vec<VehiclePosition>) -> Self {
        if let Ok(mut positions) = self.positions.lock() {
            positions.insert(line.to_owned(), Ok(vehicles));
        }
        self
    }

    pub(crate) fn with_alert_reply(self, reply: Result<AlertReply, u16>) -> Self {
        if let Ok(mut current) = self.alert_reply.lock() {
            *current = reply;
        }
        self
    }

    pub(crate) fn set_positions(&self, line: &str, vehicles: Vec<VehiclePosition>) {
        if let Ok(mut positions) = self.positions.lock() {
            positions.insert(line.to_owned(), Ok(vehicles));
        }
    }

    pub(crate) fn set_position_failure(&self, line: &str, status: u16) {
        if let Ok(mut positions) = self.positions.lock() {
            positions.insert(line.to_owned(), Err(status));
        }
    }

    pub(crate) fn position_call_count(&self) -> usize {
        self.position_calls.lock().map_or(0, |calls| calls.len())
    }

    pub(crate) fn alert_requests(&self) -> Vec<AlertRequest> {
        self.alert_calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

fn fake_status(resource: &str, status: u16) -> ApiError {
    ApiError::UnexpectedStatus {
        url: format!("http://fake/api/v1/{}", resource),
        status,
    }
}

#[async_trait]
impl TransitApi for FakeApi {
    async fn fetch_positions(&self, line: &LineId) -> Result<VehicleSnapshot, ApiError> {
        if let Ok(mut calls) = self.position_calls.lock() {
            calls.push(line.as_str().to_owned());
        }
        let scripted = self
            .positions
            .lock()
            .ok()
            .and_then(|positions| positions.get(line.as_str()).cloned());
        match scripted {
            Some(Ok(vehicles)) => Ok(VehicleSnapshot::new(vehicles)),
            Some(Err(status)) => Err(fake_status("posicoes", status)),
            None => Ok(VehicleSnapshot::empty()),
        }
    }

    async fn create_alert(&self, request: &AlertRequest) -> Result<AlertReply, ApiError> {
        if let Ok(mut calls) = self.alert_calls.lock() {
            calls.push(request.clone());
        }
        let reply = self
            .alert_reply
            .lock()
            .map_err(|err| fake_status(&format!("alertas ({})", err), 500))?
            .clone();
        reply.map_err(|status| fake_status("alertas", status))
    }
}
