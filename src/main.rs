mod alert;
mod api;
mod app;
mod args;
mod config;
mod domain;
mod entry;
mod error;
mod logger;
mod map;
mod overlay;
mod polling;
mod shutdown;
mod shutdown_handlers;
mod view;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
