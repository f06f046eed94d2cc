//! Opt-in log output for the replay tool and embedding applications.
//!
//! The pipeline and the coordinator only emit `tracing` events; nothing is
//! printed unless a subscriber is installed. Hosts that already run their own
//! subscriber can ignore this module.

/// Environment variable consulted for a filter when none is passed explicitly.
pub const LOG_FILTER_ENV: &str = "OCR_SERIES_LOG";

/// Keeps foreign crates quiet and reports extraction summaries.
pub const DEFAULT_LOG_FILTER: &str = "warn,ocr_series=info";

/// Picks the filter directive: explicit request, then [`LOG_FILTER_ENV`],
/// then [`DEFAULT_LOG_FILTER`]. Blank values are skipped.
#[must_use]
pub fn resolve_log_filter(requested: Option<&str>, from_env: Option<&str>) -> String {
    [requested, from_env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_LOG_FILTER)
        .to_owned()
}

/// Installs a stderr subscriber using the filter from [`LOG_FILTER_ENV`] or
/// [`DEFAULT_LOG_FILTER`].
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(None)
}

/// Installs a compact stderr subscriber when the `telemetry` feature is on.
///
/// Returns `false` when the feature is off, the directive does not parse, or
/// the host already set a global subscriber. Stdout stays free for pipeline
/// output.
#[must_use]
pub fn init_tracing_with_filter(requested: Option<&str>) -> bool {
    let from_env = std::env::var(LOG_FILTER_ENV).ok();
    let directive = resolve_log_filter(requested, from_env.as_deref());

    #[cfg(feature = "telemetry")]
    {
        let Ok(filter) = tracing_subscriber::EnvFilter::try_new(&directive) else {
            return false;
        };
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
