use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::shutdown::ShutdownSender;
use crate::view::{ViewState, render};

/// Prints the view to stdout whenever it changes. Rapid updates are
/// coalesced by the watch channel, so only the latest state is drawn.
pub(crate) fn spawn_render_task(
    mut state_rx: watch::Receiver<ViewState>,
    shutdown_tx: &ShutdownSender,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown_tx.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => break,
                changed = state_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let frame = render(&state_rx.borrow_and_update());
                    println!("{}\n", frame);
                }
            }
        }
    })
}
