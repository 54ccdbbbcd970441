//! Terminal host: wires the view to stdin, stdout and the transit API.
mod input;
mod output;
mod session;

use std::sync::Arc;

use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::api::HttpTransitApi;
use crate::args::ClientArgs;
use crate::error::AppResult;
use crate::map::ConsoleSurface;
use crate::polling::TokioTicker;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};
use crate::view::{ViewModel, ViewSettings};

use input::{Command, read_commands};
use output::spawn_render_task;
use session::{SessionChannels, drive};

/// Typed commands waiting for the session loop.
const COMMAND_CHANNEL_CAPACITY: usize = 32;

pub(crate) async fn run_client(args: ClientArgs) -> AppResult<()> {
    let api = Arc::new(HttpTransitApi::new(
        &args.api_url,
        args.request_timeout,
        args.connect_timeout,
    )?);
    info!("Using transit API at {}", api.base_url());

    let (shutdown_tx, _) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let surface = ConsoleSurface::new();
    let relay = surface.click_relay();
    let (ticker, ticks) = TokioTicker::channel();
    let (click_tx, clicks) = mpsc::unbounded_channel();
    let settings = ViewSettings {
        map_view: args.map_view(),
        poll_interval: args.poll_interval,
        ..ViewSettings::default()
    };
    let mut view = ViewModel::mount(surface, ticker, &settings, click_tx);
    let render_handle = spawn_render_task(view.subscribe(), &shutdown_tx);

    if let Some(email) = args.email.as_deref() {
        view.set_email(email);
    }

    let (command_tx, commands) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    if let Some(line) = args.line
        && command_tx.send(Command::SelectLine(line)).await.is_err()
    {
        warn!("Failed to queue the initial line");
    }
    info!("Type 'help' for the list of commands");
    let input_handle = tokio::spawn(read_commands(
        BufReader::new(tokio::io::stdin()),
        command_tx,
        relay,
    ));

    let channels = SessionChannels {
        commands,
        clicks,
        ticks,
        shutdown: shutdown_tx.subscribe(),
    };
    drive(&mut view, api, channels).await;

    drop(shutdown_tx.send(()));
    input_handle.abort();
    let surface = view.unmount();
    debug!(live_markers = surface.live_markers(), "Map released");

    render_handle.await?;
    signal_handle.await?;
    Ok(())
}
