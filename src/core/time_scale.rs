use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::primitives::{datetime_to_unix_seconds, unix_seconds_to_datetime};
use crate::core::scale::normalize_range;
use crate::core::{LinearScale, TimeSeriesRecord, Viewport};
use crate::error::{ExtractError, ExtractResult};

/// Tuning controls for fitting the time axis to record timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScaleTuning {
    pub left_padding_ratio: f64,
    pub right_padding_ratio: f64,
    /// Span in seconds used when every record shares one timestamp.
    pub min_span_seconds: f64,
}

impl Default for TimeScaleTuning {
    fn default() -> Self {
        Self {
            left_padding_ratio: 0.0,
            right_padding_ratio: 0.0,
            min_span_seconds: 60.0,
        }
    }
}

impl TimeScaleTuning {
    fn validate(self) -> ExtractResult<Self> {
        if !self.left_padding_ratio.is_finite()
            || !self.right_padding_ratio.is_finite()
            || self.left_padding_ratio < 0.0
            || self.right_padding_ratio < 0.0
        {
            return Err(ExtractError::InvalidData(
                "time scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_seconds.is_finite() || self.min_span_seconds <= 0.0 {
            return Err(ExtractError::InvalidData(
                "time scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Horizontal axis in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeScale {
    start: f64,
    end: f64,
}

impl TimeScale {
    pub fn new(time_start: f64, time_end: f64) -> ExtractResult<Self> {
        let (start, end) = normalize_range(time_start, time_end, 1.0)?;
        Ok(Self { start, end })
    }

    pub fn from_records(records: &[TimeSeriesRecord]) -> ExtractResult<Self> {
        Self::from_records_tuned(records, TimeScaleTuning::default())
    }

    /// Fits the axis to the earliest and latest record, then applies padding.
    pub fn from_records_tuned(
        records: &[TimeSeriesRecord],
        tuning: TimeScaleTuning,
    ) -> ExtractResult<Self> {
        let tuning = tuning.validate()?;
        if records.is_empty() {
            return Err(ExtractError::InvalidData(
                "time scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in records {
            let seconds = record.unix_seconds();
            min = min.min(seconds);
            max = max.max(seconds);
        }

        let (full_start, full_end) = normalize_range(min, max, tuning.min_span_seconds)?;
        let span = full_end - full_start;
        Ok(Self {
            start: full_start - span * tuning.left_padding_ratio,
            end: full_end + span * tuning.right_padding_ratio,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn time_to_pixel(self, time: f64, viewport: Viewport) -> ExtractResult<f64> {
        self.linear()?
            .domain_to_pixel(time, viewport_width(viewport)?)
    }

    pub fn pixel_to_time(self, pixel: f64, viewport: Viewport) -> ExtractResult<f64> {
        self.linear()?
            .pixel_to_domain(pixel, viewport_width(viewport)?)
    }

    pub fn datetime_to_pixel(self, time: DateTime<Utc>, viewport: Viewport) -> ExtractResult<f64> {
        self.time_to_pixel(datetime_to_unix_seconds(time), viewport)
    }

    pub fn pixel_to_datetime(self, pixel: f64, viewport: Viewport) -> ExtractResult<DateTime<Utc>> {
        unix_seconds_to_datetime(self.pixel_to_time(pixel, viewport)?)
    }

    fn linear(self) -> ExtractResult<LinearScale> {
        LinearScale::new(self.start, self.end)
    }
}

pub(crate) fn viewport_width(viewport: Viewport) -> ExtractResult<f64> {
    if !viewport.is_valid() {
        return Err(ExtractError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(f64::from(viewport.width))
}

pub(crate) fn viewport_height(viewport: Viewport) -> ExtractResult<f64> {
    if !viewport.is_valid() {
        return Err(ExtractError::InvalidViewport {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(f64::from(viewport.height))
}
