//! Composition root holding the observable state of the live map.
mod render;
mod state;

#[cfg(test)]
mod tests;

use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::alert::{AlertReceipt, prepare_alert};
use crate::domain::{AlertRequest, Coordinate, LineId, VehicleSnapshot};
use crate::error::{AlertError, ApiError};
use crate::map::{ClickSender, MapSurface, MapView, OSM_TILES, TileLayer};
use crate::overlay::{StartPointSelector, VehicleMarkers};
use crate::polling::{
    DEFAULT_POLL_INTERVAL, FetchIssue, FetchTicket, FetchUpdate, PollingController, Tick,
    TickScheduler,
};

pub use render::{render, render_vehicle_table};
pub use state::{AlertStatus, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub struct ViewSettings {
    pub map_view: MapView,
    pub tile_layer: TileLayer,
    pub poll_interval: Duration,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            map_view: MapView::default(),
            tile_layer: OSM_TILES,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Owns the map surface, both overlays and the polling controller for one
/// mounted lifetime.
///
/// Every mutation publishes a fresh [`ViewState`] on a watch channel.
pub struct ViewModel<S, T>
where
    S: MapSurface,
    T: TickScheduler,
{
    surface: S,
    vehicle_markers: VehicleMarkers<S::Marker>,
    start_point: StartPointSelector<S::Marker>,
    polling: PollingController<T>,
    vehicles: VehicleSnapshot,
    issue: Option<FetchIssue>,
    email: String,
    alert: Option<AlertStatus>,
    alert_pending: bool,
    refreshed_at: Option<DateTime<Local>>,
    state_tx: watch::Sender<ViewState>,
}

impl<S, T> ViewModel<S, T>
where
    S: MapSurface,
    T: TickScheduler,
{
    /// Prepares the surface (view, tiles, click listener) and starts idle.
    pub fn mount(mut surface: S, scheduler: T, settings: &ViewSettings, clicks: ClickSender) -> Self {
        surface.initialize(settings.map_view);
        surface.add_tile_layer(&settings.tile_layer);
        surface.register_click_listener(clicks);

        let (state_tx, _) = watch::channel(ViewState::default());
        let view = Self {
            surface,
            vehicle_markers: VehicleMarkers::new(),
            start_point: StartPointSelector::new(),
            polling: PollingController::new(scheduler, settings.poll_interval),
            vehicles: VehicleSnapshot::empty(),
            issue: None,
            email: String::new(),
            alert: None,
            alert_pending: false,
            refreshed_at: None,
            state_tx,
        };
        view.publish();
        view
    }

    /// Releases every marker and the poll timer, handing the surface back.
    pub fn unmount(mut self) -> S {
        self.polling.stop();
        self.vehicle_markers.clear(&mut self.surface);
        self.start_point.clear(&mut self.surface);
        self.publish();
        debug!("View unmounted");
        self.surface
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> ViewState {
        ViewState {
            line: self.polling.line().map(|line| line.as_str().to_owned()),
            phase: self.polling.phase(),
            loading: self.polling.is_loading(),
            vehicles: self.vehicles.as_slice().to_vec(),
            issue: self.issue,
            start_point: self.start_point.point(),
            email: self.email.clone(),
            alert: self.alert.clone(),
            alert_pending: self.alert_pending,
            refreshed_at: self.refreshed_at,
        }
    }

    /// Re-sends the current state to observers.
    pub fn publish(&self) {
        self.state_tx.send_replace(self.state());
    }

    /// Switches polling to `raw`. Blank input is ignored.
    pub fn select_line(&mut self, raw: &str) -> Option<FetchTicket> {
        let Some(line) = LineId::parse(raw) else {
            debug!("Ignoring blank line selection");
            return None;
        };
        self.issue = None;
        let ticket = self.polling.select_line(line);
        self.publish();
        Some(ticket)
    }

    /// Fetches now for the current line, leaving the timer untouched.
    pub fn search(&mut self) -> Option<FetchTicket> {
        let ticket = self.polling.search();
        if ticket.is_some() {
            self.publish();
        }
        ticket
    }

    pub fn on_tick(&mut self, tick: Tick) -> Option<FetchTicket> {
        let ticket = self.polling.on_tick(tick);
        if ticket.is_some() {
            self.publish();
        }
        ticket
    }

    /// Applies a finished fetch. Returns `false` when it was discarded as stale.
    pub fn apply_fetch(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<VehicleSnapshot, ApiError>,
    ) -> bool {
        let Some(update) = self.polling.complete(ticket, outcome) else {
            return false;
        };
        match update {
            FetchUpdate::Vehicles(snapshot) => {
                self.vehicle_markers.apply(&mut self.surface, &snapshot);
                self.vehicles = snapshot;
                self.issue = None;
                self.refreshed_at = Some(Local::now());
            }
            FetchUpdate::NoVehicles => {
                self.vehicles = VehicleSnapshot::empty();
                self.vehicle_markers.apply(&mut self.surface, &self.vehicles);
                self.issue = Some(FetchIssue::NoVehicles);
                self.refreshed_at = Some(Local::now());
            }
            FetchUpdate::Failed => {
                self.issue = Some(FetchIssue::FetchFailed);
            }
        }
        self.publish();
        true
    }

    pub fn on_map_click(&mut self, coordinate: Coordinate) {
        self.start_point.on_surface_click(&mut self.surface, coordinate);
        self.publish();
    }

    pub fn set_email(&mut self, email: &str) {
        email.trim().clone_into(&mut self.email);
        self.publish();
    }

    /// Validates the alert form. On failure the status line shows why and
    /// `None` is returned; nothing is sent.
    pub fn begin_alert(&mut self) -> Option<AlertRequest> {
        let line = self
            .polling
            .line()
            .map(|line| line.as_str().to_owned())
            .unwrap_or_default();
        let prepared = prepare_alert(&self.email, &line, self.start_point.point());
        match prepared {
            Ok(request) => {
                self.alert_pending = true;
                self.publish();
                Some(request)
            }
            Err(err) => {
                debug!("Alert not sent: {}", err);
                self.alert = Some(AlertStatus {
                    message: err.user_message().to_owned(),
                    success: false,
                });
                self.publish();
                None
            }
        }
    }

    /// Records the outcome of a submission. Success resets the email field and
    /// the start point; failure leaves both as they were.
    pub fn finish_alert(&mut self, outcome: Result<AlertReceipt, AlertError>) {
        self.alert_pending = false;
        self.alert = Some(match outcome {
            Ok(receipt) => {
                info!("{}", receipt.message);
                self.email.clear();
                self.start_point.clear(&mut self.surface);
                AlertStatus {
                    message: receipt.message,
                    success: true,
                }
            }
            Err(err) => AlertStatus {
                message: err.user_message().to_owned(),
                success: false,
            },
        });
        self.publish();
    }

    pub const fn surface(&self) -> &S {
        &self.surface
    }

    pub const fn polling(&self) -> &PollingController<T> {
        &self.polling
    }

    pub fn vehicle_marker_count(&self) -> usize {
        self.vehicle_markers.len()
    }
}
