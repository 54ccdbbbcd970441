use std::sync::Arc;

use futures_util::future::{BoxFuture, FutureExt};
use futures_util::stream::{FuturesUnordered, StreamExt};
use tokio::sync::mpsc;
use tracing::debug;

use crate::alert::{AlertReceipt, AlertSubmitter};
use crate::api::TransitApi;
use crate::domain::{AlertRequest, VehicleSnapshot};
use crate::error::{AlertError, ApiError};
use crate::map::{ClickReceiver, MapSurface};
use crate::polling::{FetchTicket, TickReceiver, TickScheduler};
use crate::shutdown::ShutdownReceiver;
use crate::view::ViewModel;

use super::input::Command;

/// A request that finished while the loop kept serving input.
enum Completion {
    Fetch {
        ticket: FetchTicket,
        outcome: Result<VehicleSnapshot, ApiError>,
    },
    Alert(Result<AlertReceipt, AlertError>),
}

type PendingWork = FuturesUnordered<BoxFuture<'static, Completion>>;

pub(crate) struct SessionChannels {
    pub(crate) commands: mpsc::Receiver<Command>,
    pub(crate) clicks: ClickReceiver,
    pub(crate) ticks: TickReceiver,
    pub(crate) shutdown: ShutdownReceiver,
}

/// Runs the view until `quit`, closed input or a shutdown broadcast.
///
/// Fetches and alert submissions run concurrently with input handling.
/// Finished requests are applied before the next command is read, and
/// anything still in flight on exit is dropped.
pub(crate) async fn drive<S, T, A>(
    view: &mut ViewModel<S, T>,
    api: Arc<A>,
    mut channels: SessionChannels,
) where
    S: MapSurface,
    T: TickScheduler,
    A: TransitApi + 'static,
{
    let submitter = AlertSubmitter::new(Arc::clone(&api));
    let mut pending = PendingWork::new();

    loop {
        tokio::select! {
            biased;
            _ = channels.shutdown.recv() => {
                debug!("Shutdown received");
                break;
            }
            Some(done) = pending.next(), if !pending.is_empty() => match done {
                Completion::Fetch { ticket, outcome } => {
                    view.apply_fetch(&ticket, outcome);
                }
                Completion::Alert(outcome) => view.finish_alert(outcome),
            },
            Some(coordinate) = channels.clicks.recv() => view.on_map_click(coordinate),
            Some(tick) = channels.ticks.recv() => {
                if let Some(ticket) = view.on_tick(tick) {
                    pending.push(fetch_positions(Arc::clone(&api), ticket));
                }
            }
            command = channels.commands.recv() => {
                let Some(command) = command else {
                    debug!("Command channel closed");
                    break;
                };
                if command == Command::Quit {
                    break;
                }
                if let Some(work) = handle_command(view, command, &api, &submitter) {
                    pending.push(work);
                }
            }
        }
    }

    if !pending.is_empty() {
        debug!(in_flight = pending.len(), "Dropping unfinished requests");
    }
}

fn handle_command<S, T, A>(
    view: &mut ViewModel<S, T>,
    command: Command,
    api: &Arc<A>,
    submitter: &AlertSubmitter<A>,
) -> Option<BoxFuture<'static, Completion>>
where
    S: MapSurface,
    T: TickScheduler,
    A: TransitApi + 'static,
{
    match command {
        Command::SelectLine(line) => view
            .select_line(&line)
            .map(|ticket| fetch_positions(Arc::clone(api), ticket)),
        Command::Search => {
            let ticket = view.search();
            if ticket.is_none() {
                debug!("Search ignored: no line selected");
            }
            ticket.map(|ticket| fetch_positions(Arc::clone(api), ticket))
        }
        Command::Email(email) => {
            view.set_email(&email);
            None
        }
        Command::SubmitAlert => view
            .begin_alert()
            .map(|request| send_alert(submitter.clone(), request)),
        Command::Status => {
            view.publish();
            None
        }
        Command::Quit => None,
    }
}

fn fetch_positions<A>(api: Arc<A>, ticket: FetchTicket) -> BoxFuture<'static, Completion>
where
    A: TransitApi + 'static,
{
    async move {
        let outcome = api.fetch_positions(ticket.line()).await;
        Completion::Fetch { ticket, outcome }
    }
    .boxed()
}

fn send_alert<A>(submitter: AlertSubmitter<A>, request: AlertRequest) -> BoxFuture<'static, Completion>
where
    A: TransitApi + 'static,
{
    async move { Completion::Alert(submitter.send(request).await) }.boxed()
}
