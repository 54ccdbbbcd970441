//! Refresh timer and request lifecycle for the selected line.
mod controller;
mod ticker;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{FetchIssue, FetchTicket, FetchUpdate, PollPhase, PollingController};
pub use ticker::{Tick, TickReceiver, TickScheduler, TickSender, TimerHandle, TokioTicker};

use std::time::Duration;

/// Fixed refresh period of the live positions view.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(30);
