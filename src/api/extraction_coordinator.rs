use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard, watch};
use tracing::{debug, info, warn};

use crate::error::{ExtractError, ExtractResult};
use crate::interaction::{Selection, nearest_record};
use crate::ocr::{ImageAsset, OcrEngine, join_fragments};
use crate::pipeline::{ExtractionOutcome, run_pipeline};

use super::{ExtractionState, ExtractorConfig, TimeSeriesChart};

/// Owns extraction state and is its only writer.
///
/// At most one extraction runs at a time; a second request made while one is
/// outstanding fails with [`ExtractError::Busy`] and leaves state untouched.
/// Observers follow changes through [`ExtractionCoordinator::subscribe`].
pub struct ExtractionCoordinator {
    config: ExtractorConfig,
    engine: Arc<dyn OcrEngine>,
    state_tx: watch::Sender<ExtractionState>,
    in_flight: Mutex<()>,
}

impl ExtractionCoordinator {
    pub fn new(config: ExtractorConfig, engine: Arc<dyn OcrEngine>) -> ExtractResult<Self> {
        let config = config.validate()?;
        let (state_tx, _) = watch::channel(ExtractionState::default());
        Ok(Self {
            config,
            engine,
            state_tx,
            in_flight: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ExtractionState> {
        self.state_tx.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> ExtractionState {
        self.state_tx.borrow().clone()
    }

    /// Loads the configured image, runs OCR on a blocking worker, then repairs
    /// and decodes the transcription.
    ///
    /// A missing or empty image aborts without any state change. OCR and
    /// worker failures keep the previous records and JSON text and only record
    /// `last_error`. A transcription that cannot be repaired into JSON replaces
    /// them with the error text and an empty series, and the error is returned.
    pub async fn extract(&self) -> ExtractResult<ExtractionState> {
        let guard = self.begin()?;

        let fragments = match self.recognize().await {
            Ok(fragments) => fragments,
            Err(err) => {
                warn!(error = %err, image = %self.config.image_name, "extraction aborted");
                if !matches!(err, ExtractError::ImageLoad { .. }) {
                    self.state_tx
                        .send_modify(|state| state.last_error = Some(err.to_string()));
                }
                return Err(err);
            }
        };

        let raw = join_fragments(&fragments, &self.config.fragment_separator);
        debug!(
            fragments = fragments.len(),
            raw_len = raw.len(),
            "ocr transcription received"
        );
        let published = self.publish(run_pipeline(&raw));
        drop(guard);
        published.map(|()| self.state())
    }

    /// Runs the repair pipeline over a transcription obtained elsewhere.
    pub fn ingest_transcription(&self, raw: &str) -> ExtractResult<ExtractionState> {
        let guard = self.begin()?;
        let published = self.publish(run_pipeline(raw));
        drop(guard);
        published.map(|()| self.state())
    }

    /// Current records as a chart model sized by the configured viewport.
    pub fn chart(&self) -> ExtractResult<TimeSeriesChart> {
        let records = self.state_tx.borrow().time_series.clone();
        TimeSeriesChart::new(records, self.config.chart_viewport)
    }

    /// Selects the record nearest to a horizontal pointer position on the chart.
    pub fn select_at_x(&self, x: f64) -> ExtractResult<Option<Selection>> {
        let selection = self.chart()?.select_at_x(x)?;
        self.set_selection(selection);
        Ok(selection)
    }

    /// Selects the record nearest in time to `time`.
    pub fn select_nearest(&self, time: DateTime<Utc>) -> Option<Selection> {
        let selection = nearest_record(&self.state_tx.borrow().time_series, time);
        self.set_selection(selection);
        selection
    }

    pub fn clear_selection(&self) {
        self.set_selection(None);
    }

    fn set_selection(&self, selection: Option<Selection>) {
        self.state_tx.send_if_modified(|state| {
            if state.selected == selection {
                return false;
            }
            state.selected = selection;
            true
        });
    }

    fn begin(&self) -> ExtractResult<InFlightGuard<'_>> {
        let Ok(lock) = self.in_flight.try_lock() else {
            warn!("extraction requested while another is in flight");
            return Err(ExtractError::Busy);
        };
        self.state_tx.send_modify(|state| state.in_flight = true);
        Ok(InFlightGuard {
            state_tx: &self.state_tx,
            _lock: lock,
        })
    }

    async fn recognize(&self) -> ExtractResult<Vec<String>> {
        let image = ImageAsset::load(
            &self.config.asset_dir,
            &self.config.image_name,
            &self.config.image_extensions,
        )?;
        let engine = Arc::clone(&self.engine);
        let fragments = tokio::task::spawn_blocking(move || engine.recognize(&image))
            .await
            .map_err(|e| ExtractError::WorkerJoin(e.to_string()))??;
        Ok(fragments)
    }

    fn publish(&self, outcome: ExtractionOutcome) -> ExtractResult<()> {
        let ExtractionOutcome {
            extracted_json,
            records,
            error,
        } = outcome;
        info!(
            record_count = records.len(),
            success = error.is_none(),
            "extraction finished"
        );

        self.state_tx.send_modify(|state| {
            state.extracted_json = extracted_json;
            state.time_series = records;
            state.selected = None;
            state.last_error = error.as_ref().map(ToString::to_string);
            state.generation += 1;
        });

        match error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Clears the published in-flight flag when an extraction ends or is dropped.
struct InFlightGuard<'a> {
    state_tx: &'a watch::Sender<ExtractionState>,
    _lock: MutexGuard<'a, ()>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state_tx.send_modify(|state| state.in_flight = false);
    }
}
