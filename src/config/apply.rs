use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::ClientArgs;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::map::MAX_ZOOM;

use super::types::{ConfigFile, DurationValue, MapConfig};

/// Applies configuration values to CLI arguments. Values given on the
/// command line are never overridden.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut ClientArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "api_url")
        && let Some(api_url) = config.api_url.clone()
    {
        args.api_url = api_url;
    }

    if !is_cli(matches, "line")
        && let Some(line) = config.line.clone()
    {
        args.line = Some(line);
    }

    if !is_cli(matches, "email")
        && let Some(email) = config.email.clone()
    {
        args.email = Some(email);
    }

    if !is_cli(matches, "poll_interval")
        && let Some(interval) = config.poll_interval.as_ref()
    {
        args.poll_interval = config_duration(interval, "poll_interval")?;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = config_duration(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = config_duration(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if let Some(map) = config.map.as_ref() {
        apply_map_config(args, matches, map)?;
    }

    Ok(())
}

fn apply_map_config(args: &mut ClientArgs, matches: &ArgMatches, map: &MapConfig) -> AppResult<()> {
    if !is_cli(matches, "center") {
        if let Some(lat) = map.center_lat {
            args.center.lat = finite_degrees(lat, "map.center_lat")?;
        }
        if let Some(lng) = map.center_lng {
            args.center.lng = finite_degrees(lng, "map.center_lng")?;
        }
    }

    if !is_cli(matches, "zoom")
        && let Some(zoom) = map.zoom
    {
        if zoom > MAX_ZOOM {
            return Err(AppError::config(ConfigError::ZoomOutOfRange { max: MAX_ZOOM }));
        }
        args.zoom = zoom;
    }
    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn config_duration(value: &DurationValue, field: &'static str) -> AppResult<std::time::Duration> {
    value
        .to_duration()
        .map_err(|err| AppError::config(ConfigError::InvalidDuration { field, source: err }))
}

fn finite_degrees(value: f64, field: &'static str) -> AppResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::config(ConfigError::InvalidCoordinate {
            field,
            source: ValidationError::CoordinateNotFinite {
                value: value.to_string(),
            },
        }))
    }
}
