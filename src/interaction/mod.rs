use chrono::{DateTime, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::TimeSeriesRecord;

/// Record picked by pointer interaction, with its distance from the query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Selection {
    pub record_index: usize,
    pub record: TimeSeriesRecord,
    pub distance_seconds: f64,
}

/// Finds the record closest in time to `query`.
///
/// Ties keep the earliest record in slice order. Returns `None` for empty input.
#[must_use]
pub fn nearest_record(records: &[TimeSeriesRecord], query: DateTime<Utc>) -> Option<Selection> {
    let mut best: Option<(OrderedFloat<f64>, usize)> = None;
    for (index, record) in records.iter().enumerate() {
        let delta = record.timestamp.signed_duration_since(query);
        let dist = OrderedFloat(delta.num_milliseconds().unsigned_abs() as f64 / 1000.0);
        match best {
            Some((current, _)) if current <= dist => {}
            _ => best = Some((dist, index)),
        }
    }

    best.map(|(dist, record_index)| Selection {
        record_index,
        record: records[record_index],
        distance_seconds: dist.into_inner(),
    })
}
