use chrono::{DateTime, Local};

use crate::domain::{Coordinate, VehiclePosition};
use crate::polling::{FetchIssue, PollPhase};

/// Result of the last alert submission, as shown under the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertStatus {
    pub message: String,
    pub success: bool,
}

/// Everything an observer of the view can see.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub line: Option<String>,
    pub phase: PollPhase,
    pub loading: bool,
    pub vehicles: Vec<VehiclePosition>,
    pub issue: Option<FetchIssue>,
    pub start_point: Option<Coordinate>,
    pub email: String,
    pub alert: Option<AlertStatus>,
    pub alert_pending: bool,
    pub refreshed_at: Option<DateTime<Local>>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            line: None,
            phase: PollPhase::Idle,
            loading: false,
            vehicles: Vec::new(),
            issue: None,
            start_point: None,
            email: String::new(),
            alert: None,
            alert_pending: false,
            refreshed_at: None,
        }
    }
}
