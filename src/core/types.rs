use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::primitives::datetime_to_unix_seconds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// One element of the canonical `time_series` array, before timestamp validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesEntry {
    pub timestamp: String,
    pub value: f64,
}

/// Serde shape of the canonical document `{"time_series": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesDocument {
    pub time_series: Vec<TimeSeriesEntry>,
}

/// Validated observation with a generated identity for list rendering.
///
/// Two records with the same timestamp and value are still distinct: the
/// decoder never deduplicates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

impl TimeSeriesRecord {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            value,
        }
    }

    /// Timestamp as fractional unix seconds, the chart's time domain unit.
    #[must_use]
    pub fn unix_seconds(&self) -> f64 {
        datetime_to_unix_seconds(self.timestamp)
    }
}
