use std::collections::BTreeSet;
use std::time::Duration;

use super::TickScheduler;

/// Scheduler that only records what it was asked to do.
#[derive(Debug, Default)]
pub(crate) struct FakeScheduler {
    pub(crate) armed: Vec<(u64, Duration)>,
    pub(crate) cancelled: Vec<u64>,
    pub(crate) live: BTreeSet<u64>,
}

#[derive(Debug)]
pub(crate) struct FakeTimer(pub(crate) u64);

impl TickScheduler for FakeScheduler {
    type Timer = FakeTimer;

    fn arm(&mut self, generation: u64, period: Duration) -> FakeTimer {
        self.armed.push((generation, period));
        self.live.insert(generation);
        FakeTimer(generation)
    }

    fn cancel(&mut self, timer: FakeTimer) {
        self.cancelled.push(timer.0);
        self.live.remove(&timer.0);
    }
}
