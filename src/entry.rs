use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app;
use crate::args::ClientArgs;
use crate::error::AppResult;

/// How long blocking work (the stdin reader) may linger after the session ends.
const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(250);

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;
    apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = runtime.block_on(app::run_client(args));
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
    result
}

fn parse_args() -> AppResult<(ClientArgs, ArgMatches)> {
    let matches = ClientArgs::command().get_matches_from(std::env::args_os());
    let args = ClientArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut ClientArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}
