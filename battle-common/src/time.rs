//! Timestamp utilities

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

use crate::{Error, Result};

/// Naive formats accepted for rating event timestamps, tried in order
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
];

/// Parse an event timestamp string
///
/// Accepts RFC 3339, the common naive `date time` layouts, and a bare
/// `YYYY-MM-DD` date (midnight). An RFC 3339 offset is dropped and the local
/// wall-clock time kept, so the calendar date is the one written in the file.
pub fn parse_event_time(raw: &str) -> Result<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.naive_local());
    }

    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| Error::Timestamp(raw.to_string()))
}

/// Serde adapter for `event_time` columns
pub fn deserialize_event_time<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_event_time(&raw).map_err(serde::de::Error::custom)
}
