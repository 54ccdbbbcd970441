use clap::Parser;
use std::time::Duration;

use crate::api::DEFAULT_API_BASE_URL;
use crate::domain::Coordinate;
use crate::map::MapView;

use super::parsers::{parse_bool_env, parse_coordinate, parse_duration_arg, parse_zoom};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Follow live bus positions for a transit line and register arrival alerts from the terminal."
)]
pub struct ClientArgs {
    /// Base URL of the transit API
    #[arg(long = "api-url", env = "BUSWATCH_API_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_url: String,

    /// Line to start polling right away (e.g. 483)
    #[arg(long, short = 'l')]
    pub line: Option<String>,

    /// Email address prefilled in the alert form
    #[arg(long)]
    pub email: Option<String>,

    /// How often the selected line is refreshed (supports ms/s/m/h)
    #[arg(
        long = "poll-interval",
        default_value = "30s",
        value_parser = parse_duration_arg
    )]
    pub poll_interval: Duration,

    /// Request timeout (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "10s",
        value_parser = parse_duration_arg
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "5s",
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Initial map center as 'lat,lng'
    #[arg(
        long = "center",
        default_value = "-22.9068,-43.1729",
        allow_hyphen_values = true,
        value_parser = parse_coordinate
    )]
    pub center: Coordinate,

    /// Initial map zoom level
    #[arg(long = "zoom", default_value = "12", value_parser = parse_zoom)]
    pub zoom: u8,

    /// Enable verbose logging (sets log level to debug unless overridden by BUSWATCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Path to config file (TOML/JSON). Defaults to ./buswatch.toml or ./buswatch.json if present.
    #[arg(long)]
    pub config: Option<String>,
}

impl ClientArgs {
    #[must_use]
    pub const fn map_view(&self) -> MapView {
        MapView {
            center: self.center,
            zoom: self.zoom,
        }
    }
}
