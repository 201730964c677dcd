use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{Error, Result};

/// Formats accepted for timestamps written as strings in an instrument archive.
/// RFC 3339 with an offset is tried before these.
pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

/// Parse a date string to Unix seconds (UTC), keeping millisecond precision.
pub fn parse_timestamp(value: &str) -> Result<f64> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.timestamp_millis() as f64 / 1000.0);
    }
    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Ok(dt.and_utc().timestamp_millis() as f64 / 1000.0);
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(dt) = d.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc().timestamp() as f64);
        }
    }
    Err(Error::InvalidTimestamp(value.to_string()))
}

fn to_datetime(ts: f64) -> Option<DateTime<Utc>> {
    if !ts.is_finite() {
        return None;
    }
    let secs = ts.floor() as i64;
    let nanos = ((ts - ts.floor()) * 1_000_000_000.0) as u32;
    DateTime::<Utc>::from_timestamp(secs, nanos)
}

/// Format a Unix timestamp as a human-readable datetime string.
/// Shows milliseconds when the timestamp has a fractional component.
pub fn format_timestamp(ts: f64) -> String {
    match to_datetime(ts) {
        Some(dt) if dt.timestamp_subsec_millis() == 0 => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
        None => format!("{ts:.3}"),
    }
}

/// Short tick label. Seconds are dropped once the visible span exceeds an hour.
pub fn format_tick(ts: f64, span_secs: f64) -> String {
    match to_datetime(ts) {
        Some(dt) if span_secs > 3600.0 => dt.format("%H:%M").to_string(),
        Some(dt) => dt.format("%H:%M:%S").to_string(),
        None => format!("{ts:.0}"),
    }
}

pub fn format_date(ts: f64) -> String {
    to_datetime(ts)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Seconds(f64),
    Text(String),
}

/// Serde adapter accepting either Unix seconds or date strings.
pub fn deserialize_timestamps<'de, D>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawTimestamp>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|r| match r {
            RawTimestamp::Seconds(s) => Ok(s),
            RawTimestamp::Text(s) => parse_timestamp(&s).map_err(serde::de::Error::custom),
        })
        .collect()
}
