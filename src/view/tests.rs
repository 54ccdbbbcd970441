use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::*;
use crate::alert::{ALERT_CREATED_MESSAGE, AlertSubmitter};
use crate::api::test_support::FakeApi;
use crate::domain::VehiclePosition;
use crate::map::DEFAULT_ZOOM;
use crate::map::test_support::RecordingSurface;
use crate::overlay::START_POINT_LABEL;
use crate::polling::PollPhase;
use crate::polling::test_support::FakeScheduler;

type TestView = ViewModel<RecordingSurface, FakeScheduler>;

fn mount() -> TestView {
    let (clicks, _) = mpsc::unbounded_channel();
    ViewModel::mount(
        RecordingSurface::default(),
        FakeScheduler::default(),
        &ViewSettings::default(),
        clicks,
    )
}

fn bus(identity: &str, latitude: f64, longitude: f64, speed_kmh: f64) -> VehiclePosition {
    VehiclePosition {
        identity: identity.to_owned(),
        latitude,
        longitude,
        speed_kmh,
        updated_at: "12:00:00".to_owned(),
    }
}

fn snapshot(vehicles: Vec<VehiclePosition>) -> VehicleSnapshot {
    VehicleSnapshot::new(vehicles)
}

#[test]
fn mount_prepares_surface_and_starts_idle() -> Result<(), String> {
    let view = mount();
    let surface = view.surface();
    match surface.view {
        Some(map_view) if map_view.zoom == DEFAULT_ZOOM => {}
        other => return Err(format!("Unexpected initial view {:?}", other)),
    }
    if surface.tile_layers != 1 || surface.listener.is_none() {
        return Err("Expected one tile layer and a click listener".to_owned());
    }
    let state = view.state();
    if state.phase != PollPhase::Idle || state.line.is_some() || !surface.live.is_empty() {
        return Err(format!("Unexpected initial state {:?}", state));
    }
    Ok(())
}

#[test]
fn single_vehicle_becomes_single_labelled_marker() -> Result<(), String> {
    let mut view = mount();
    let ticket = view
        .select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    if !view.state().loading {
        return Err("Expected loading while the first fetch runs".to_owned());
    }

    let applied = view.apply_fetch(
        &ticket,
        Ok(snapshot(vec![bus("A1", -22.9, -43.2, 34.6)])),
    );
    if !applied {
        return Err("Fresh response should be applied".to_owned());
    }

    let labels = view.surface().labels();
    if labels != vec!["A1 / 35 km/h".to_owned()] {
        return Err(format!("Unexpected labels {:?}", labels));
    }
    let state = view.state();
    if state.vehicles.len() != 1
        || state.issue.is_some()
        || state.loading
        || state.phase != PollPhase::Polling
        || state.refreshed_at.is_none()
    {
        return Err(format!("Unexpected state {:?}", state));
    }
    Ok(())
}

#[test]
fn empty_response_reports_no_vehicles() -> Result<(), String> {
    let mut view = mount();
    let first = view
        .select_line("999")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.apply_fetch(&first, Ok(snapshot(vec![bus("B2", -22.9, -43.2, 10.0)])));
    let second = view
        .search()
        .ok_or_else(|| "Expected a search ticket".to_owned())?;
    view.apply_fetch(&second, Ok(VehicleSnapshot::empty()));

    if view.vehicle_marker_count() != 0 || !view.surface().live.is_empty() {
        return Err("Expected every vehicle marker to be gone".to_owned());
    }
    let state = view.state();
    if state.issue != Some(FetchIssue::NoVehicles) || !state.vehicles.is_empty() {
        return Err(format!("Unexpected state {:?}", state));
    }
    Ok(())
}

#[test]
fn failed_fetch_keeps_last_vehicles() -> Result<(), String> {
    let mut view = mount();
    let first = view
        .select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.apply_fetch(&first, Ok(snapshot(vec![bus("A1", -22.9, -43.2, 20.0)])));

    let second = view
        .on_tick(Tick {
            generation: first.generation(),
        })
        .ok_or_else(|| "Expected a tick ticket".to_owned())?;
    view.apply_fetch(
        &second,
        Err(ApiError::UnexpectedStatus {
            url: "http://fake/api/v1/posicoes/483".to_owned(),
            status: 500,
        }),
    );

    let state = view.state();
    if state.issue != Some(FetchIssue::FetchFailed)
        || state.phase != PollPhase::Error
        || state.vehicles.len() != 1
        || view.vehicle_marker_count() != 1
    {
        return Err(format!("Unexpected state {:?}", state));
    }
    Ok(())
}

#[test]
fn response_for_previous_line_is_discarded() -> Result<(), String> {
    let mut view = mount();
    let stale = view
        .select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.select_line("100")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;

    if view.apply_fetch(&stale, Ok(snapshot(vec![bus("A1", -22.9, -43.2, 20.0)]))) {
        return Err("Stale response must not be applied".to_owned());
    }
    if view.vehicle_marker_count() != 0 || view.state().line.as_deref() != Some("100") {
        return Err(format!("Unexpected state {:?}", view.state()));
    }
    let scheduler = view.polling().scheduler();
    if scheduler.live.len() != 1 || scheduler.cancelled.len() != 1 {
        return Err(format!("Expected exactly one live timer, got {:?}", scheduler));
    }
    Ok(())
}

#[test]
fn blank_line_selection_is_ignored() -> Result<(), String> {
    let mut view = mount();
    if view.select_line("   ").is_some() {
        return Err("Blank selection should not fetch".to_owned());
    }
    if !view.polling().scheduler().armed.is_empty() {
        return Err("Blank selection should not arm a timer".to_owned());
    }
    Ok(())
}

#[test]
fn incomplete_alert_shows_validation_message() -> Result<(), String> {
    let mut view = mount();
    view.set_email("rider@example.com");
    if view.begin_alert().is_some() {
        return Err("Alert without line or start point should not be sent".to_owned());
    }
    match view.state().alert {
        Some(status) if !status.success && status.message == AlertError::INCOMPLETE_MESSAGE => {
            Ok(())
        }
        other => Err(format!("Unexpected alert status {:?}", other)),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn successful_alert_clears_email_and_start_point_once() -> Result<(), String> {
    let api = Arc::new(FakeApi::default());
    let submitter = AlertSubmitter::new(Arc::clone(&api));
    let mut view = mount();

    view.select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.on_map_click(Coordinate::new(-22.95, -43.18));
    view.set_email("rider@example.com");

    let request = view
        .begin_alert()
        .ok_or_else(|| "Expected a complete alert form".to_owned())?;
    if !view.state().alert_pending {
        return Err("Expected a pending submission".to_owned());
    }
    let removed_before = view.surface().removed;
    view.finish_alert(submitter.send(request).await);

    let body = serde_json::to_value(
        api.alert_requests()
            .first()
            .ok_or_else(|| "Expected one request".to_owned())?,
    )
    .map_err(|err| err.to_string())?;
    let expected = serde_json::json!({
        "email": "rider@example.com",
        "linha": "483",
        "latitude_ponto": -22.95,
        "longitude_ponto": -43.18,
    });
    if body != expected {
        return Err(format!("Unexpected body {}", body));
    }

    let state = view.state();
    if !state.email.is_empty() || state.start_point.is_some() || state.alert_pending {
        return Err(format!("Form should be reset, got {:?}", state));
    }
    if view.surface().removed != removed_before.saturating_add(1)
        || view.surface().labels().contains(&START_POINT_LABEL.to_owned())
    {
        return Err("Start point marker should be removed exactly once".to_owned());
    }
    match state.alert {
        Some(status) if status.success && status.message == ALERT_CREATED_MESSAGE => Ok(()),
        other => Err(format!("Unexpected alert status {:?}", other)),
    }
}

#[tokio::test(flavor = "current_thread")]
async fn failed_alert_keeps_form() -> Result<(), String> {
    let api = Arc::new(FakeApi::default().with_alert_reply(Err(503)));
    let submitter = AlertSubmitter::new(api);
    let mut view = mount();
    let start = Coordinate::new(-22.95, -43.18);

    view.select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.on_map_click(start);
    view.set_email("rider@example.com");
    let request = view
        .begin_alert()
        .ok_or_else(|| "Expected a complete alert form".to_owned())?;
    view.finish_alert(submitter.send(request).await);

    let state = view.state();
    if state.email != "rider@example.com" || state.start_point != Some(start) {
        return Err(format!("Form should be untouched, got {:?}", state));
    }
    match state.alert {
        Some(status) if !status.success && status.message == AlertError::FAILURE_MESSAGE => Ok(()),
        other => Err(format!("Unexpected alert status {:?}", other)),
    }
}

#[test]
fn unmount_releases_markers_and_timer() -> Result<(), String> {
    let mut view = mount();
    let ticket = view
        .select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    view.apply_fetch(
        &ticket,
        Ok(snapshot(vec![
            bus("A1", -22.9, -43.2, 20.0),
            bus("A2", -22.8, -43.1, 30.0),
        ])),
    );
    view.on_map_click(Coordinate::new(-22.95, -43.18));

    let surface = view.unmount();
    if !surface.live.is_empty() || surface.placed != surface.removed {
        return Err(format!(
            "Expected every marker released, placed {} removed {}",
            surface.placed, surface.removed
        ));
    }
    Ok(())
}

#[test]
fn observers_see_published_state() -> Result<(), String> {
    let mut view = mount();
    let mut rx = view.subscribe();
    view.set_email("rider@example.com");
    if !rx.has_changed().map_err(|err| err.to_string())? {
        return Err("Expected a change notification".to_owned());
    }
    if rx.borrow_and_update().email != "rider@example.com" {
        return Err("Observer saw stale state".to_owned());
    }
    Ok(())
}

#[test]
fn custom_period_reaches_the_timer() -> Result<(), String> {
    let (clicks, _) = mpsc::unbounded_channel();
    let settings = ViewSettings {
        poll_interval: Duration::from_secs(5),
        ..ViewSettings::default()
    };
    let mut view = ViewModel::mount(
        RecordingSurface::default(),
        FakeScheduler::default(),
        &settings,
        clicks,
    );
    view.select_line("483")
        .ok_or_else(|| "Expected a fetch ticket".to_owned())?;
    match view.polling().scheduler().armed.as_slice() {
        [(_, period)] if *period == Duration::from_secs(5) => Ok(()),
        other => Err(format!("Unexpected timers {:?}", other)),
    }
}
