use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike, Utc};

use crate::error::{ExtractError, ExtractResult};

/// Second-precision UTC form accepted for record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Byte layout of `YYYY-MM-DDTHH:MM:SSZ`; `#` marks an ASCII digit.
const TIMESTAMP_SHAPE: &[u8; 20] = b"####-##-##T##:##:##Z";

/// Parses `YYYY-MM-DDTHH:MM:SSZ` strictly; no offsets, fractions or zone inference.
///
/// Every field must be zero-padded to its full width and leap seconds are
/// rejected.
#[must_use]
pub fn parse_timestamp_utc(input: &str) -> Option<DateTime<Utc>> {
    if !has_timestamp_shape(input) {
        return None;
    }
    let naive = NaiveDateTime::parse_from_str(input, TIMESTAMP_FORMAT).ok()?;
    if naive.nanosecond() >= 1_000_000_000 {
        return None;
    }
    Some(naive.and_utc())
}

fn has_timestamp_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == TIMESTAMP_SHAPE.len()
        && bytes
            .iter()
            .zip(TIMESTAMP_SHAPE)
            .all(|(&byte, &expected)| match expected {
                b'#' => byte.is_ascii_digit(),
                literal => byte == literal,
            })
}

#[must_use]
pub fn format_timestamp_utc(time: DateTime<Utc>) -> String {
    time.format(TIMESTAMP_FORMAT).to_string()
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

pub fn unix_seconds_to_datetime(seconds: f64) -> ExtractResult<DateTime<Utc>> {
    if !seconds.is_finite() {
        return Err(ExtractError::InvalidData(
            "unix seconds must be finite".to_owned(),
        ));
    }
    let millis = (seconds * 1000.0).round();
    if millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return Err(ExtractError::InvalidData(format!(
            "unix seconds out of range: {seconds}"
        )));
    }
    Utc.timestamp_millis_opt(millis as i64)
        .single()
        .ok_or_else(|| ExtractError::InvalidData(format!("unix seconds out of range: {seconds}")))
}
