//! Timestamp formatting and parsing.
//!
//! All durations are signed [`TimeDelta`] values with millisecond precision.
//! Display output is truncated to tenths of a second.

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;
use thiserror::Error;

/// Pre-compiled regex for `[M:]S[.T]` timestamps.
///
/// The separator before the tenths digit may be `.` or `:`.
static TIMESTAMP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:(\d+):)?(\d+)(?:[.:](\d))?$").unwrap());

/// Errors produced while parsing timestamps.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// The value does not look like a timestamp.
    #[error("malformed timestamp: {value:?}")]
    Malformed { value: String },

    /// The value parsed but does not fit in a duration.
    #[error("timestamp out of range: {value:?}")]
    OutOfRange { value: String },
}

/// How a duration is rendered by [`format_time`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeStyle {
    /// `MM:SS.T`, always zero-padded.
    #[default]
    Full,
    /// `S.T` below one minute, `M:SS.T` otherwise.
    Compact,
    /// Signed compact form, `+` for non-negative values.
    Difference,
}

/// Formats an optional duration. Unknown values format as an empty string.
pub fn format_time(time: Option<TimeDelta>, style: TimeStyle) -> String {
    let Some(time) = time else {
        return String::new();
    };

    if time < TimeDelta::zero() {
        let magnitude = if style == TimeStyle::Difference {
            TimeStyle::Compact
        } else {
            TimeStyle::Full
        };
        return format!("-{}", format_magnitude(-time, magnitude));
    }

    match style {
        TimeStyle::Difference => format!("+{}", format_magnitude(time, TimeStyle::Compact)),
        style => format_magnitude(time, style),
    }
}

fn format_magnitude(time: TimeDelta, style: TimeStyle) -> String {
    let millis = time.num_milliseconds();
    let total_seconds = millis / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let tenths = (millis / 100) % 10;

    match style {
        TimeStyle::Full => format!("{minutes:02}:{seconds:02}.{tenths}"),
        _ if total_seconds < 60 => format!("{seconds}.{tenths}"),
        _ => format!("{minutes}:{seconds:02}.{tenths}"),
    }
}

/// Parses a timestamp such as `01:05.3`, `1:05:3`, `1:05` or `5.3`.
///
/// Minutes are not bounded to two digits.
pub fn parse_time(formatted: &str) -> Result<TimeDelta, TimeError> {
    let trimmed = formatted.trim();
    let Some(caps) = TIMESTAMP_RE.captures(trimmed) else {
        return Err(TimeError::Malformed {
            value: formatted.to_string(),
        });
    };

    let out_of_range = || TimeError::OutOfRange {
        value: formatted.to_string(),
    };
    let number = |index: usize| -> Result<i64, TimeError> {
        caps.get(index)
            .map_or(Ok(0), |m| m.as_str().parse::<i64>())
            .map_err(|_| out_of_range())
    };

    let minutes = number(1)?;
    let seconds = number(2)?;
    let tenths = number(3)?;

    let millis = minutes
        .checked_mul(60)
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .and_then(|ms| ms.checked_add(tenths * 100))
        .ok_or_else(out_of_range)?;

    TimeDelta::try_milliseconds(millis).ok_or_else(out_of_range)
}
