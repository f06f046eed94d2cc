use serde::{Deserialize, Serialize};

use crate::core::TimeSeriesRecord;
use crate::interaction::Selection;

/// Snapshot published to observers after every coordinator mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionState {
    /// Pretty-printed canonical JSON, or the error text of a failed parse.
    pub extracted_json: String,
    pub time_series: Vec<TimeSeriesRecord>,
    pub selected: Option<Selection>,
    pub in_flight: bool,
    pub last_error: Option<String>,
    /// Count of completed extractions; bumps even when the result is empty.
    pub generation: u64,
}

impl ExtractionState {
    #[must_use]
    pub fn has_records(&self) -> bool {
        !self.time_series.is_empty()
    }
}
