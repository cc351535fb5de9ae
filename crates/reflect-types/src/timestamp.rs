//! On-disk timestamp codec.
//!
//! Version 1 writes RFC 3339 in UTC with nanosecond precision
//! (`2024-05-01T13:45:12.123456789Z`), so a decoded value equals the one
//! that was encoded. Decoding also accepts the offset-less
//! local form (`2024-05-01T13:45:12.123456`, seconds optional) found in
//! journals created before the format was versioned.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

pub const FORMAT_VERSION: u32 = 1;

const LEGACY_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

#[derive(Debug, Error)]
#[error("unrecognised timestamp: {raw:?}")]
pub struct TimestampError {
    pub raw: String,
}

pub fn encode(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

pub fn decode(raw: &str) -> Result<DateTime<Utc>, TimestampError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }

    LEGACY_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(from_legacy_local)
        .ok_or_else(|| TimestampError {
            raw: raw.to_string(),
        })
}

fn from_legacy_local(naive: NaiveDateTime) -> DateTime<Utc> {
    // A wall time inside a DST gap has no local instant; keep it as UTC.
    match Local.from_local_datetime(&naive).earliest() {
        Some(local) => local.with_timezone(&Utc),
        None => Utc.from_utc_datetime(&naive),
    }
}
