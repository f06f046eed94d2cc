//! Host-facing surface: configuration, the extraction coordinator and the
//! chart model it feeds.

mod extraction_coordinator;
mod extraction_state;
mod extractor_config;
mod time_series_chart;

pub use extraction_coordinator::ExtractionCoordinator;
pub use extraction_state::ExtractionState;
pub use extractor_config::ExtractorConfig;
pub use time_series_chart::TimeSeriesChart;
