//! Regex scrape of timestamp/value fields into the canonical document.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Key whose presence gates extraction.
pub const SERIES_KEY: &str = "\"time_series\"";

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""timestamp":\s*"([0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}Z)""#)
        .expect("timestamp pattern is valid")
});

static VALUE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""value":\s*([0-9.]+)"#).expect("value pattern is valid"));

/// Raw match lists in document order, before pairing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPairs {
    pub timestamps: Vec<String>,
    pub values: Vec<String>,
}

impl ExtractedPairs {
    /// Number of entries that survive positional pairing.
    #[must_use]
    pub fn paired_len(&self) -> usize {
        self.timestamps.len().min(self.values.len())
    }

    /// Timestamp/value pairs up to the shorter list; surplus matches are dropped.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.timestamps
            .iter()
            .zip(self.values.iter())
            .map(|(ts, value)| (ts.as_str(), value.as_str()))
    }
}

/// Collects every timestamp and value match, left to right, non-overlapping.
#[must_use]
pub fn extract_pairs(normalized: &str) -> ExtractedPairs {
    let timestamps = TIMESTAMP_RE
        .captures_iter(normalized)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .collect();
    let values = VALUE_RE
        .captures_iter(normalized)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_owned())
        .collect();
    ExtractedPairs { timestamps, values }
}

/// Rebuilds `normalized` as the canonical `{"time_series": [...]}` document.
///
/// Text without a `"time_series"` key is returned unchanged.
#[must_use]
pub fn extract_time_series(normalized: &str) -> String {
    if !normalized.contains(SERIES_KEY) {
        debug!("no time_series key; extraction skipped");
        return normalized.to_owned();
    }

    let pairs = extract_pairs(normalized);
    debug!(
        timestamps = pairs.timestamps.len(),
        values = pairs.values.len(),
        paired = pairs.paired_len(),
        "time series fields scraped"
    );
    render_canonical(&pairs)
}

fn render_canonical(pairs: &ExtractedPairs) -> String {
    let count = pairs.paired_len();
    let mut out = String::from("{\n    \"time_series\": [\n");
    for (index, (timestamp, value)) in pairs.pairs().enumerate() {
        out.push_str("        {\"timestamp\": \"");
        out.push_str(timestamp);
        out.push_str("\", \"value\": ");
        out.push_str(value);
        out.push('}');
        out.push_str(if index + 1 < count { ",\n" } else { "\n" });
    }
    out.push_str("    ]\n}");
    out
}
