use crate::core::{TimeScale, TimeSeriesRecord, ValueScale, Viewport};
use crate::error::ExtractResult;
use serde::{Deserialize, Serialize};

/// Projected line segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Projected point mark for one record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMark {
    pub x: f64,
    pub y: f64,
    pub record_index: usize,
}

/// Projects records into point marks, one per record, in record order.
pub fn project_point_marks(
    records: &[TimeSeriesRecord],
    time_scale: TimeScale,
    value_scale: ValueScale,
    viewport: Viewport,
) -> ExtractResult<Vec<PointMark>> {
    let mut marks = Vec::with_capacity(records.len());
    for (record_index, record) in records.iter().enumerate() {
        marks.push(PointMark {
            x: time_scale.datetime_to_pixel(record.timestamp, viewport)?,
            y: value_scale.value_to_pixel(record.value, viewport)?,
            record_index,
        });
    }
    Ok(marks)
}

/// Projects records into adjacent line segments.
///
/// Segments follow record order, not chronological order, so unsorted input
/// draws exactly as it was extracted.
pub fn project_line_segments(
    records: &[TimeSeriesRecord],
    time_scale: TimeScale,
    value_scale: ValueScale,
    viewport: Viewport,
) -> ExtractResult<Vec<LineSegment>> {
    if records.len() < 2 {
        return Ok(Vec::new());
    }

    let marks = project_point_marks(records, time_scale, value_scale, viewport)?;
    let mut segments = Vec::with_capacity(marks.len() - 1);
    for pair in marks.windows(2) {
        segments.push(LineSegment {
            x1: pair[0].x,
            y1: pair[0].y,
            x2: pair[1].x,
            y2: pair[1].y,
        });
    }

    Ok(segments)
}
