use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::trace;

/// A timer firing for the poll session identified by `generation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

pub type TickSender = mpsc::UnboundedSender<Tick>;
pub type TickReceiver = mpsc::UnboundedReceiver<Tick>;

/// Arms and cancels repeating timers.
///
/// A timer armed for `generation` keeps producing [`Tick`]s with that
/// generation until it is handed back to [`TickScheduler::cancel`].
pub trait TickScheduler {
    type Timer;

    fn arm(&mut self, generation: u64, period: Duration) -> Self::Timer;
    fn cancel(&mut self, timer: Self::Timer);
}

/// Timer backed by a spawned tokio task.
///
/// Dropping the handle also stops the task.
#[derive(Debug)]
pub struct TimerHandle {
    generation: u64,
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl TimerHandle {
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    fn stop(&mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).ok();
        }
        self.task.abort();
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Decrements the live-timer gauge however the timer task ends.
struct LiveGuard(Arc<AtomicUsize>);

impl Drop for LiveGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// [`TickScheduler`] delivering ticks over an unbounded channel.
#[derive(Debug, Clone)]
pub struct TokioTicker {
    tx: TickSender,
    live: Arc<AtomicUsize>,
}

impl TokioTicker {
    #[must_use]
    pub fn new(tx: TickSender) -> Self {
        Self {
            tx,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns the ticker together with the receiving end of its ticks.
    #[must_use]
    pub fn channel() -> (Self, TickReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }

    /// Number of timer tasks still running.
    #[must_use]
    pub fn live_timers(&self) -> usize {
        self.live.load(Ordering::SeqCst)
    }
}

impl TickScheduler for TokioTicker {
    type Timer = TimerHandle;

    fn arm(&mut self, generation: u64, period: Duration) -> TimerHandle {
        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();
        let tx = self.tx.clone();
        self.live.fetch_add(1, Ordering::SeqCst);
        let guard = LiveGuard(Arc::clone(&self.live));

        let task = tokio::spawn(async move {
            let _guard = guard;
            let start = Instant::now()
                .checked_add(period)
                .unwrap_or_else(Instant::now);
            let mut ticks = interval_at(start, period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        trace!(generation, "Poll timer fired");
                        if tx.send(Tick { generation }).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        TimerHandle {
            generation,
            stop: Some(stop_tx),
            task,
        }
    }

    fn cancel(&mut self, mut timer: TimerHandle) {
        timer.stop();
    }
}
