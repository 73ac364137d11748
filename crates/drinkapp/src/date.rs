//! Date codec.
//!
//! Two string forms exist for the instant a drink was tried:
//!
//! - **Display**: `DD/MM/YYYY` in the local timezone, as shown to users.
//! - **Wire**: ISO-8601 / RFC 3339 in UTC, as stored in the local blob and in
//!   the remote `drinks.date` column.
//!
//! Wire strings are written with as many fractional digits as the instant
//! needs, so encoding then decoding yields the same instant.

use crate::error::{DrinkError, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Format an instant for display in the local timezone.
pub fn format_display(date: &DateTime<Utc>) -> String {
    format_display_in(date, &Local)
}

/// Format an instant for display in the given timezone.
pub fn format_display_in<Tz: TimeZone>(date: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.with_timezone(tz).format(DISPLAY_FORMAT).to_string()
}

/// Parse a `DD/MM/YYYY` string as local midnight of that day.
pub fn parse_display(input: &str) -> Result<DateTime<Utc>> {
    parse_display_in(input, &Local)
}

pub fn parse_display_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<DateTime<Utc>> {
    let day = NaiveDate::parse_from_str(input.trim(), DISPLAY_FORMAT)
        .map_err(|e| DrinkError::InvalidDate(format!("{}: {}", input, e)))?;
    let naive = day.and_time(NaiveTime::MIN);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| DrinkError::InvalidDate(format!("{}: no such local time", input)))
}

/// Encode an instant for storage.
pub fn to_wire(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Decode a stored date.
///
/// Accepts full RFC 3339 timestamps, Postgres-style timestamps with a space
/// separator, and bare `YYYY-MM-DD` dates (read as UTC midnight).
pub fn parse_wire(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(day) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN).and_utc());
    }
    Err(DrinkError::InvalidDate(input.to_string()))
}

/// Serde adapter for `DateTime<Utc>` fields stored in wire form.
pub mod wire {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::to_wire(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_wire(&raw).map_err(serde::de::Error::custom)
    }
}
