//! ocr-series-rs: repairs OCR transcriptions of time-series reports.
//!
//! Raw OCR text is normalized into JSON, scraped into the canonical
//! `{"time_series": [...]}` document, decoded into typed records and exposed
//! through a single-writer coordinator and a line/point chart model.

pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod ocr;
pub mod pipeline;
pub mod telemetry;

pub use api::{ExtractionCoordinator, ExtractorConfig};
pub use error::{ExtractError, ExtractResult, OcrError};
pub use pipeline::{ExtractionOutcome, run_pipeline};
