use std::time::Duration;

use crate::domain::Coordinate;
use crate::error::{AppError, AppResult, ValidationError};
use crate::map::MAX_ZOOM;

pub(crate) fn parse_bool_env(s: &str) -> AppResult<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "no" | "n" | "off" => Ok(false),
        _ => Err(AppError::validation(ValidationError::InvalidBoolean {
            value: s.to_owned(),
        })),
    }
}

/// Parses `"lat,lng"`; whitespace around either number is ignored.
///
/// # Errors
///
/// Returns an error when the comma is missing or a part is not a finite number.
pub fn parse_coordinate(s: &str) -> AppResult<Coordinate> {
    parse_point(s).map_err(AppError::validation)
}

pub(crate) fn parse_point(s: &str) -> Result<Coordinate, ValidationError> {
    let value = s.trim();
    let (lat, lng) = value
        .split_once(',')
        .ok_or_else(|| ValidationError::InvalidCoordinateFormat {
            value: value.to_owned(),
        })?;
    Ok(Coordinate::new(parse_degrees(lat)?, parse_degrees(lng)?))
}

fn parse_degrees(s: &str) -> Result<f64, ValidationError> {
    let value = s.trim();
    let degrees: f64 = value
        .parse()
        .map_err(|err| ValidationError::InvalidCoordinateNumber {
            value: value.to_owned(),
            source: err,
        })?;
    if !degrees.is_finite() {
        return Err(ValidationError::CoordinateNotFinite {
            value: value.to_owned(),
        });
    }
    Ok(degrees)
}

/// # Errors
///
/// Returns an error when the value is not an integer in `0..=MAX_ZOOM`.
pub fn parse_zoom(s: &str) -> AppResult<u8> {
    match s.trim().parse::<u8>() {
        Ok(zoom) if zoom <= MAX_ZOOM => Ok(zoom),
        Ok(_) | Err(_) => Err(AppError::validation(ValidationError::ZoomOutOfRange {
            max: MAX_ZOOM,
        })),
    }
}

/// Parses durations such as `500ms`, `30s`, `2m` or `1h`; a bare number means seconds.
///
/// # Errors
///
/// Returns an error for empty, malformed, zero or overflowing durations.
pub fn parse_duration_arg(s: &str) -> AppResult<Duration> {
    parse_duration(s).map_err(AppError::validation)
}

pub(crate) fn parse_duration(s: &str) -> Result<Duration, ValidationError> {
    let value = s.trim();
    if value.is_empty() {
        return Err(ValidationError::DurationEmpty);
    }

    let mut digits_len = 0usize;
    for ch in value.chars() {
        if ch.is_ascii_digit() {
            digits_len = digits_len.saturating_add(1);
        } else {
            break;
        }
    }
    if digits_len == 0 {
        return Err(ValidationError::InvalidDurationFormat {
            value: value.to_owned(),
        });
    }
    let (num_part, unit_part) = value.split_at(digits_len);
    let number: u64 = num_part
        .parse()
        .map_err(|err| ValidationError::InvalidDurationNumber {
            value: value.to_owned(),
            source: err,
        })?;

    let unit = if unit_part.is_empty() { "s" } else { unit_part };
    let duration = match unit {
        "ms" => Duration::from_millis(number),
        "s" => Duration::from_secs(number),
        "m" => {
            let secs = number
                .checked_mul(60)
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        "h" => {
            let secs = number
                .checked_mul(60)
                .and_then(|seconds| seconds.checked_mul(60))
                .ok_or(ValidationError::DurationOverflow)?;
            Duration::from_secs(secs)
        }
        _ => {
            return Err(ValidationError::InvalidDurationUnit {
                unit: unit.to_owned(),
            });
        }
    };

    if duration.as_millis() == 0 {
        return Err(ValidationError::DurationZero);
    }

    Ok(duration)
}
