use std::fmt;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::domain::{LineId, VehicleSnapshot};
use crate::error::ApiError;

use super::{Tick, TickScheduler};

/// Identifies one issued fetch: the line it was asked for and the poll
/// session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    line: LineId,
    generation: u64,
}

impl FetchTicket {
    #[must_use]
    pub const fn line(&self) -> &LineId {
        &self.line
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// User-facing reason the vehicle list is not fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchIssue {
    NoVehicles,
    FetchFailed,
}

impl FetchIssue {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            FetchIssue::NoVehicles => "No vehicles found for this line right now.",
            FetchIssue::FetchFailed => "Failed to fetch vehicle positions.",
        }
    }
}

impl fmt::Display for FetchIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// What the view should do with a completed fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchUpdate {
    /// Publish the snapshot and clear any issue.
    Vehicles(VehicleSnapshot),
    /// Publish an empty snapshot and report [`FetchIssue::NoVehicles`].
    NoVehicles,
    /// Keep the current vehicles and report [`FetchIssue::FetchFailed`].
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling,
    Fetching,
    Error,
}

impl fmt::Display for PollPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PollPhase::Idle => "idle",
            PollPhase::Polling => "polling",
            PollPhase::Fetching => "fetching",
            PollPhase::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug)]
struct PollSession<H> {
    line: LineId,
    generation: u64,
    timer: H,
    in_flight: usize,
    failed: bool,
}

/// Drives periodic fetches for the selected line.
///
/// At most one timer is live at any time: selecting a line cancels the
/// previous session's timer before arming a new one, and [`stop`] leaves
/// none. Responses belonging to an earlier session are discarded.
///
/// [`stop`]: PollingController::stop
#[derive(Debug)]
pub struct PollingController<T>
where
    T: TickScheduler,
{
    scheduler: T,
    period: Duration,
    session: Option<PollSession<T::Timer>>,
    next_generation: u64,
}

impl<T> PollingController<T>
where
    T: TickScheduler,
{
    pub const fn new(scheduler: T, period: Duration) -> Self {
        Self {
            scheduler,
            period,
            session: None,
            next_generation: 1,
        }
    }

    /// Starts polling `line` and returns the ticket for the immediate fetch.
    pub fn select_line(&mut self, line: LineId) -> FetchTicket {
        self.stop();

        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);
        let timer = self.scheduler.arm(generation, self.period);
        info!(
            line = %line,
            generation,
            "Polling every {}s",
            self.period.as_secs()
        );

        let session = self.session.insert(PollSession {
            line,
            generation,
            timer,
            in_flight: 0,
            failed: false,
        });
        Self::issue(session)
    }

    /// Issues a fetch for a timer tick, unless the tick is from a cancelled timer.
    pub fn on_tick(&mut self, tick: Tick) -> Option<FetchTicket> {
        match self.session.as_mut() {
            Some(session) if session.generation == tick.generation => Some(Self::issue(session)),
            Some(_) | None => {
                debug!(generation = tick.generation, "Ignoring tick from a stale timer");
                None
            }
        }
    }

    /// Fetches immediately without touching the timer's period or phase.
    pub fn search(&mut self) -> Option<FetchTicket> {
        self.session.as_mut().map(Self::issue)
    }

    /// Applies a completed fetch. Returns `None` when the ticket belongs to a
    /// session that has since been replaced or stopped.
    pub fn complete(
        &mut self,
        ticket: &FetchTicket,
        outcome: Result<VehicleSnapshot, ApiError>,
    ) -> Option<FetchUpdate> {
        let Some(session) = self
            .session
            .as_mut()
            .filter(|session| session.generation == ticket.generation)
        else {
            debug!(
                line = %ticket.line,
                generation = ticket.generation,
                "Discarding response for a line that is no longer selected"
            );
            return None;
        };

        session.in_flight = session.in_flight.saturating_sub(1);
        match outcome {
            Ok(snapshot) if snapshot.is_empty() => {
                session.failed = false;
                debug!(line = %session.line, "No vehicles reported");
                Some(FetchUpdate::NoVehicles)
            }
            Ok(snapshot) => {
                session.failed = false;
                debug!(line = %session.line, vehicles = snapshot.len(), "Positions refreshed");
                Some(FetchUpdate::Vehicles(snapshot))
            }
            Err(err) => {
                session.failed = true;
                warn!(line = %session.line, "Failed to fetch positions: {}", err);
                Some(FetchUpdate::Failed)
            }
        }
    }

    /// Cancels the active timer, if any, and forgets the session.
    pub fn stop(&mut self) {
        if let Some(session) = self.session.take() {
            debug!(line = %session.line, generation = session.generation, "Stopping poll timer");
            self.scheduler.cancel(session.timer);
        }
    }

    pub fn phase(&self) -> PollPhase {
        match self.session.as_ref() {
            None => PollPhase::Idle,
            Some(session) if session.in_flight > 0 => PollPhase::Fetching,
            Some(session) if session.failed => PollPhase::Error,
            Some(_) => PollPhase::Polling,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.in_flight > 0)
    }

    pub fn line(&self) -> Option<&LineId> {
        self.session.as_ref().map(|session| &session.line)
    }

    pub const fn period(&self) -> Duration {
        self.period
    }

    pub const fn scheduler(&self) -> &T {
        &self.scheduler
    }

    fn issue(session: &mut PollSession<T::Timer>) -> FetchTicket {
        session.in_flight = session.in_flight.saturating_add(1);
        FetchTicket {
            line: session.line.clone(),
            generation: session.generation,
        }
    }
}
