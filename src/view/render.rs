use super::ViewState;

const NO_START_POINT: &str = "Click the map to set your start point";

/// Renders the view as plain text: line status, vehicle table, alert form.
#[must_use]
pub fn render(state: &ViewState) -> String {
    render_lines(state).join("\n")
}

fn render_lines(state: &ViewState) -> Vec<String> {
    let mut lines = Vec::new();
    let line = state.line.as_deref().unwrap_or("-");
    lines.push(format!("Line {} [{}]", line, state.phase));
    if let Some(refreshed) = state.refreshed_at {
        lines.push(format!("Last update: {}", refreshed.format("%H:%M:%S")));
    }
    if let Some(issue) = state.issue {
        lines.push(format!("! {}", issue));
    }
    lines.extend(vehicle_table_lines(state));

    let start = state
        .start_point
        .map_or_else(|| NO_START_POINT.to_owned(), |point| point.to_string());
    lines.push(format!("Start point: {}", start));
    let email = if state.email.is_empty() {
        "-"
    } else {
        state.email.as_str()
    };
    lines.push(format!("Email: {}", email));
    if state.alert_pending {
        lines.push("Alert: sending...".to_owned());
    } else if let Some(alert) = state.alert.as_ref() {
        let outcome = if alert.success { "ok" } else { "error" };
        lines.push(format!("Alert ({}): {}", outcome, alert.message));
    }
    lines
}

/// Order / speed / update time for each vehicle of the latest snapshot.
#[must_use]
pub fn render_vehicle_table(state: &ViewState) -> String {
    vehicle_table_lines(state).join("\n")
}

fn vehicle_table_lines(state: &ViewState) -> Vec<String> {
    let mut lines = vec![format!("{:<10} {:>10} {:>10}", "ORDER", "SPEED", "UPDATED")];
    if state.vehicles.is_empty() {
        let placeholder = if state.loading {
            "Loading..."
        } else {
            "No buses to display."
        };
        lines.push(placeholder.to_owned());
        return lines;
    }
    for vehicle in &state.vehicles {
        let speed = format!("{} km/h", vehicle.rounded_speed());
        lines.push(format!(
            "{:<10} {:>10} {:>10}",
            vehicle.identity, speed, vehicle.updated_at
        ));
    }
    lines
}
