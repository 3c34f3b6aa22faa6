use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StartTimeError {
    #[error("start time is empty")]
    Empty,
    #[error("unrecognized start time: {0:?}")]
    Unrecognized(String),
}

/// Display formats for show times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `Saturday May, 21, 2019 at 9:30PM`
    Full,
    /// `Sat 05, 21, 2019 9:30PM`
    Medium,
    /// `20190521 21:30:00`
    Compact,
}

pub fn format_datetime(value: &NaiveDateTime, format: DateFormat) -> String {
    let pattern = match format {
        DateFormat::Full => "%A %B, %-d, %Y at %-I:%M%p",
        DateFormat::Medium => "%a %m, %d, %Y %-I:%M%p",
        DateFormat::Compact => "%Y%m%d %H:%M:%S",
    };
    value.format(pattern).to_string()
}

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Parses a free-text show start time into local wall-clock time.
///
/// RFC 3339 input with an offset is converted to local time; everything else
/// is taken as already local. A bare date means midnight.
pub fn parse_start_time(input: &str) -> Result<NaiveDateTime, StartTimeError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(StartTimeError::Empty);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Local).naive_local());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Ok(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt);
        }
    }

    Err(StartTimeError::Unrecognized(input.to_string()))
}
