pub mod line_series;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use line_series::{LineSegment, PointMark, project_line_segments, project_point_marks};
pub use primitives::{TIMESTAMP_FORMAT, format_timestamp_utc, parse_timestamp_utc};
pub use scale::LinearScale;
pub use time_scale::{TimeScale, TimeScaleTuning};
pub use types::{TimeSeriesDocument, TimeSeriesEntry, TimeSeriesRecord, Viewport};
pub use value_scale::{ValueScale, ValueScaleTuning};
