use chrono::{DateTime, Utc};

use crate::core::{
    LineSegment, PointMark, TimeScale, TimeSeriesRecord, ValueScale, Viewport,
    project_line_segments, project_point_marks,
};
use crate::error::{ExtractError, ExtractResult};
use crate::interaction::{Selection, nearest_record};

/// Line-and-point chart model over one decoded record list.
///
/// Scales are fitted once from the records; an empty record list produces a
/// chart with no geometry and no selection.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesChart {
    records: Vec<TimeSeriesRecord>,
    viewport: Viewport,
    scales: Option<(TimeScale, ValueScale)>,
}

impl TimeSeriesChart {
    pub fn new(records: Vec<TimeSeriesRecord>, viewport: Viewport) -> ExtractResult<Self> {
        if !viewport.is_valid() {
            return Err(ExtractError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        let scales = if records.is_empty() {
            None
        } else {
            Some((
                TimeScale::from_records(&records)?,
                ValueScale::from_records(&records)?,
            ))
        };
        Ok(Self {
            records,
            viewport,
            scales,
        })
    }

    #[must_use]
    pub fn records(&self) -> &[TimeSeriesRecord] {
        &self.records
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn time_scale(&self) -> Option<TimeScale> {
        self.scales.map(|(time, _)| time)
    }

    #[must_use]
    pub fn value_scale(&self) -> Option<ValueScale> {
        self.scales.map(|(_, value)| value)
    }

    pub fn line_segments(&self) -> ExtractResult<Vec<LineSegment>> {
        match self.scales {
            Some((time, value)) => project_line_segments(&self.records, time, value, self.viewport),
            None => Ok(Vec::new()),
        }
    }

    pub fn point_marks(&self) -> ExtractResult<Vec<PointMark>> {
        match self.scales {
            Some((time, value)) => project_point_marks(&self.records, time, value, self.viewport),
            None => Ok(Vec::new()),
        }
    }

    /// Maps a horizontal pixel position to a timestamp on the fitted axis.
    pub fn pixel_to_time(&self, x: f64) -> ExtractResult<Option<DateTime<Utc>>> {
        match self.scales {
            Some((time, _)) => time.pixel_to_datetime(x, self.viewport).map(Some),
            None => Ok(None),
        }
    }

    /// Selects the record nearest in time to the pointer's horizontal position.
    pub fn select_at_x(&self, x: f64) -> ExtractResult<Option<Selection>> {
        Ok(self
            .pixel_to_time(x)?
            .and_then(|time| nearest_record(&self.records, time)))
    }
}
