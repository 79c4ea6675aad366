//! Time zone resolution and local-to-instant conversion.
//!
//! Uses ICU4X for Windows timezone ID to IANA mapping and timezone canonicalization.

use chrono::{DateTime, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;
use std::str::FromStr;

/// Error during timezone resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ZoneError {
    /// Unknown or invalid timezone identifier.
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),
}

/// ## Summary
/// Resolves a timezone identifier to a `chrono_tz::Tz`.
///
/// Accepts IANA names (including deprecated aliases such as `US/Eastern`)
/// and Windows names such as `Eastern Standard Time`.
///
/// ## Errors
///
/// Returns `ZoneError::UnknownTimezone` if the name cannot be resolved.
pub fn resolve_zone(name: &str) -> Result<Tz, ZoneError> {
    let trimmed = name.trim();
    if let Ok(tz) = Tz::from_str(trimmed) {
        return Ok(tz);
    }

    let normalized = normalize_tzid(trimmed);
    Tz::from_str(&normalized).map_err(|_e| ZoneError::UnknownTimezone(name.to_string()))
}

/// Normalizes Windows timezone names and IANA aliases to canonical IANA names.
fn normalize_tzid(tzid: &str) -> String {
    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(tzid, None) {
        // Get the canonical IANA name from the BCP-47 timezone ID
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    // Handles aliases like Europe/Kiev -> Europe/Kyiv
    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(tzid);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    tzid.to_string()
}

/// ## Summary
/// Places a local wall-clock time in `zone`.
///
/// A time that falls in a DST gap is shifted forward by one hour; a time
/// that occurs twice in a DST fold resolves to the earlier instant.
#[must_use]
pub fn localize(local: NaiveDateTime, zone: Tz) -> DateTime<Tz> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _latest) => earliest,
        LocalResult::None => {
            let shifted = local + TimeDelta::hours(1);
            tracing::trace!(%local, %shifted, zone = zone.name(), "Shifting time out of DST gap");
            zone.from_local_datetime(&shifted)
                .earliest()
                .unwrap_or_else(|| zone.from_utc_datetime(&local))
        }
    }
}
