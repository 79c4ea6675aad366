//! Parsers for the string-typed descriptor fields.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::ValidationError;
use crate::zone::resolve_zone;

const TIME_FORMATS: [&str; 6] = [
    "%H:%M",
    "%H:%M:%S",
    "%I:%M %p",
    "%I:%M:%S %p",
    "%I:%M%p",
    "%I:%M:%S%p",
];

/// Time of day, optionally pinned to a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeOfDay {
    pub time: NaiveTime,
    #[serde(serialize_with = "serialize_zone")]
    pub zone: Option<Tz>,
}

fn serialize_zone<S: serde::Serializer>(zone: &Option<Tz>, serializer: S) -> Result<S::Ok, S::Error> {
    match zone {
        Some(tz) => serializer.serialize_some(tz.name()),
        None => serializer.serialize_none(),
    }
}

/// ## Summary
/// Parses `HH:MM[:SS]`, optionally with `AM`/`PM`, optionally followed by a
/// zone name (`"9:30 PM Europe/Berlin"`, `"09:00 Eastern Standard Time"`).
///
/// ## Errors
/// Returns `InvalidTime` when no prefix parses as a time, and
/// `UnknownTimeZone` when the time parses but the trailing zone does not.
pub fn parse_time_of_day(value: &str) -> Result<TimeOfDay, ValidationError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();

    // Longest time prefix wins so that "9:00 PM" is never read as "9:00" in zone "PM".
    for split in (1..=tokens.len()).rev() {
        let Some(time) = parse_clock(&tokens[..split].join(" ")) else {
            continue;
        };
        if split == tokens.len() {
            return Ok(TimeOfDay { time, zone: None });
        }
        let zone_name = tokens[split..].join(" ");
        return resolve_zone(&zone_name)
            .map(|tz| TimeOfDay {
                time,
                zone: Some(tz),
            })
            .map_err(|_e| ValidationError::UnknownTimeZone(zone_name));
    }

    Err(ValidationError::InvalidTime(value.to_string()))
}

fn parse_clock(value: &str) -> Option<NaiveTime> {
    TIME_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(value, format).ok())
}

/// ## Summary
/// Parses a calendar date in `YYYY-MM-DD` form.
///
/// ## Errors
/// Returns `InvalidDate` for anything else.
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_e| ValidationError::InvalidDate(value.to_string()))
}

/// Upper bound as written by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Until {
    /// An exact instant.
    Instant(DateTime<FixedOffset>),
    /// A calendar date; the whole day is included.
    Date(NaiveDate),
}

/// ## Summary
/// Parses an RFC 3339 instant or a `YYYY-MM-DD` date.
///
/// ## Errors
/// Returns `InvalidUntil` for anything else.
pub fn parse_until(value: &str) -> Result<Until, ValidationError> {
    let trimmed = value.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(Until::Instant(instant));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Until::Date)
        .map_err(|_e| ValidationError::InvalidUntil(value.to_string()))
}
