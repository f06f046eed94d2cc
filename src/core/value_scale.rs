use serde::{Deserialize, Serialize};

use crate::core::scale::normalize_range;
use crate::core::time_scale::viewport_height;
use crate::core::{LinearScale, TimeSeriesRecord, Viewport};
use crate::error::{ExtractError, ExtractResult};

/// Tuning controls for value-domain autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScaleTuning {
    pub top_padding_ratio: f64,
    pub bottom_padding_ratio: f64,
    pub min_span_absolute: f64,
}

impl Default for ValueScaleTuning {
    fn default() -> Self {
        Self {
            top_padding_ratio: 0.10,
            bottom_padding_ratio: 0.10,
            min_span_absolute: 0.000_001,
        }
    }
}

impl ValueScaleTuning {
    fn validate(self) -> ExtractResult<Self> {
        if !self.top_padding_ratio.is_finite()
            || !self.bottom_padding_ratio.is_finite()
            || self.top_padding_ratio < 0.0
            || self.bottom_padding_ratio < 0.0
        {
            return Err(ExtractError::InvalidData(
                "value scale padding ratios must be finite and >= 0".to_owned(),
            ));
        }

        if !self.min_span_absolute.is_finite() || self.min_span_absolute <= 0.0 {
            return Err(ExtractError::InvalidData(
                "value scale min span must be finite and > 0".to_owned(),
            ));
        }

        Ok(self)
    }
}

/// Vertical axis mapped to an inverted Y pixel axis: larger values sit higher.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueScale {
    min: f64,
    max: f64,
}

impl ValueScale {
    pub fn new(value_min: f64, value_max: f64) -> ExtractResult<Self> {
        let (start, end) = LinearScale::new(value_min, value_max)?.domain();
        Ok(Self {
            min: start.min(end),
            max: start.max(end),
        })
    }

    pub fn from_records(records: &[TimeSeriesRecord]) -> ExtractResult<Self> {
        Self::from_records_tuned(records, ValueScaleTuning::default())
    }

    pub fn from_records_tuned(
        records: &[TimeSeriesRecord],
        tuning: ValueScaleTuning,
    ) -> ExtractResult<Self> {
        let tuning = tuning.validate()?;
        if records.is_empty() {
            return Err(ExtractError::InvalidData(
                "value scale cannot be built from empty data".to_owned(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for record in records {
            if !record.value.is_finite() {
                return Err(ExtractError::InvalidData(
                    "record values must be finite".to_owned(),
                ));
            }
            min = min.min(record.value);
            max = max.max(record.value);
        }

        let (low, high) = normalize_range(min, max, tuning.min_span_absolute)?;
        let span = high - low;
        Ok(Self {
            min: low - span * tuning.bottom_padding_ratio,
            max: high + span * tuning.top_padding_ratio,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn value_to_pixel(self, value: f64, viewport: Viewport) -> ExtractResult<f64> {
        let height = viewport_height(viewport)?;
        let from_bottom = LinearScale::new(self.min, self.max)?.domain_to_pixel(value, height)?;
        Ok(height - from_bottom)
    }

    pub fn pixel_to_value(self, pixel: f64, viewport: Viewport) -> ExtractResult<f64> {
        let height = viewport_height(viewport)?;
        if !pixel.is_finite() {
            return Err(ExtractError::InvalidData("pixel must be finite".to_owned()));
        }
        LinearScale::new(self.min, self.max)?.pixel_to_domain(height - pixel, height)
    }
}
