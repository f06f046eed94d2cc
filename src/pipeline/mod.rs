//! OCR text → canonical JSON → typed records.
//!
//! [`run_pipeline`] chains the three stages and never fails outright: a
//! document that still does not parse after repair yields an outcome whose
//! display text is the parse error and whose record list is empty.

pub mod decoder;
pub mod extractor;
pub mod normalizer;

pub use decoder::{decode, decode_lossy};
pub use extractor::{ExtractedPairs, SERIES_KEY, extract_pairs, extract_time_series};
pub use normalizer::{NORMALIZATION_RULES, ReplacementRule, normalize};

use serde_json::Value;
use tracing::{debug, warn};

use crate::core::TimeSeriesRecord;
use crate::error::{ExtractError, ExtractResult};

/// Result of one pass over a raw transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionOutcome {
    /// Pretty-printed canonical JSON, or the parse error message on failure.
    pub extracted_json: String,
    pub records: Vec<TimeSeriesRecord>,
    pub error: Option<ExtractError>,
}

impl ExtractionOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    fn failed(error: ExtractError) -> Self {
        Self {
            extracted_json: error.to_string(),
            records: Vec::new(),
            error: Some(error),
        }
    }
}

/// Repairs, extracts and pretty-prints `raw` as JSON.
pub fn format_extracted_json(raw: &str) -> ExtractResult<String> {
    let canonical = extract_time_series(&normalize(raw));
    let value: Value = serde_json::from_str(&canonical)?;
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Runs normalize → extract → pretty-print → decode over one transcription.
#[must_use]
pub fn run_pipeline(raw: &str) -> ExtractionOutcome {
    let extracted_json = match format_extracted_json(raw) {
        Ok(json) => json,
        Err(err) => {
            warn!(error = %err, raw_len = raw.len(), "repaired text is not valid JSON");
            return ExtractionOutcome::failed(err);
        }
    };

    let records = decode_lossy(&extracted_json);
    debug!(record_count = records.len(), "pipeline completed");
    ExtractionOutcome {
        extracted_json,
        records,
        error: None,
    }
}
