use tracing::{debug, trace, warn};

use crate::core::{TimeSeriesDocument, TimeSeriesRecord, parse_timestamp_utc};
use crate::error::ExtractResult;

/// Decodes canonical JSON into records, dropping entries with unparseable timestamps.
///
/// Order follows the document; nothing is sorted or deduplicated.
pub fn decode(canonical: &str) -> ExtractResult<Vec<TimeSeriesRecord>> {
    let document: TimeSeriesDocument = serde_json::from_str(canonical)?;
    let entry_count = document.time_series.len();

    let records: Vec<TimeSeriesRecord> = document
        .time_series
        .into_iter()
        .filter_map(|entry| match parse_timestamp_utc(&entry.timestamp) {
            Some(timestamp) => Some(TimeSeriesRecord::new(timestamp, entry.value)),
            None => {
                trace!(timestamp = %entry.timestamp, "dropping entry with invalid timestamp");
                None
            }
        })
        .collect();

    debug!(
        entry_count,
        record_count = records.len(),
        "decoded time series"
    );
    Ok(records)
}

/// Like [`decode`], but logs a parse failure and yields no records.
#[must_use]
pub fn decode_lossy(canonical: &str) -> Vec<TimeSeriesRecord> {
    decode(canonical).unwrap_or_else(|err| {
        warn!(error = %err, "time series decode failed");
        Vec::new()
    })
}
