use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex, mpsc};

use chrono::{TimeZone, Utc};
use ocr_series::api::{ExtractionCoordinator, ExtractorConfig};
use ocr_series::core::Viewport;
use ocr_series::ocr::{ImageAsset, OcrEngine, SidecarTextOcr, StaticTextOcr};
use ocr_series::{ExtractError, OcrError};
use tempfile::TempDir;

const SERIES_FRAGMENTS: [&str; 2] = [
    r#"{"time_series":{"timestamp": "2024-01-01T00:00:00Z","#,
    r#""value": 1.5}}"#,
];

const THREE_ENTRIES: &str = concat!(
    r#"{"time_series":[{"timestamp": "2024-01-01T00:00:00Z", "value": 1}"#,
    r#"{"timestamp": "2024-01-01T00:01:40Z", "value": 2}"#,
    r#"{"timestamp": "2024-01-01T00:03:20Z", "value": 3}]}"#,
);

struct FailingOcr;

impl OcrEngine for FailingOcr {
    fn recognize(&self, _image: &ImageAsset) -> Result<Vec<String>, OcrError> {
        Err(OcrError::new("vision request failed"))
    }
}

/// Blocks inside `recognize` until the test releases it.
struct GatedOcr {
    release: Mutex<mpsc::Receiver<()>>,
}

impl OcrEngine for GatedOcr {
    fn recognize(&self, _image: &ImageAsset) -> Result<Vec<String>, OcrError> {
        let release = self
            .release
            .lock()
            .map_err(|_| OcrError::new("gate poisoned"))?;
        release
            .recv()
            .map_err(|_| OcrError::new("gate dropped"))?;
        Ok(SERIES_FRAGMENTS.iter().map(|s| (*s).to_owned()).collect())
    }
}

struct PanickingOcr;

impl OcrEngine for PanickingOcr {
    fn recognize(&self, _image: &ImageAsset) -> Result<Vec<String>, OcrError> {
        panic!("vision worker crashed");
    }
}

fn asset_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("time_series_report.png"), b"\x89PNG").expect("write image");
    dir
}

fn coordinator(dir: &Path, engine: Arc<dyn OcrEngine>) -> ExtractionCoordinator {
    let config = ExtractorConfig::default()
        .with_asset_dir(dir)
        .with_chart_viewport(Viewport::new(200, 100));
    ExtractionCoordinator::new(config, engine).expect("coordinator")
}

#[tokio::test]
async fn extraction_publishes_decoded_records() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(StaticTextOcr::new(SERIES_FRAGMENTS)));

    let state = coordinator.extract().await.expect("extract");

    assert_eq!(state.generation, 1);
    assert!(!state.in_flight);
    assert!(state.last_error.is_none());
    assert_eq!(state.time_series.len(), 1);
    assert_eq!(
        state.time_series[0].timestamp,
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("ts")
    );
    assert_eq!(state.time_series[0].value, 1.5);
    assert!(state.extracted_json.contains("\"time_series\""));
}

#[tokio::test]
async fn subscribers_observe_completed_extraction() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(StaticTextOcr::new(SERIES_FRAGMENTS)));
    let mut rx = coordinator.subscribe();

    coordinator.extract().await.expect("extract");

    assert!(rx.has_changed().expect("sender alive"));
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.generation, 1);
    assert_eq!(seen.time_series.len(), 1);
}

#[tokio::test]
async fn missing_image_aborts_without_touching_records() {
    let dir = tempfile::tempdir().expect("tempdir");
    let coordinator = coordinator(dir.path(), Arc::new(StaticTextOcr::new(SERIES_FRAGMENTS)));

    let err = coordinator.extract().await.expect_err("no image");

    assert!(matches!(err, ExtractError::ImageLoad { ref name } if name == "time_series_report"));
    let state = coordinator.state();
    assert_eq!(state.generation, 0);
    assert!(state.time_series.is_empty());
    assert!(state.extracted_json.is_empty());
    assert!(state.last_error.is_none());
    assert!(!state.in_flight);
}

#[tokio::test]
async fn ocr_failure_keeps_previous_records() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(FailingOcr));
    coordinator
        .ingest_transcription(THREE_ENTRIES)
        .expect("ingest");

    let err = coordinator.extract().await.expect_err("ocr fails");

    assert!(matches!(err, ExtractError::Ocr(_)));
    let state = coordinator.state();
    assert_eq!(state.generation, 1);
    assert_eq!(state.time_series.len(), 3);
    assert_eq!(
        state.last_error.as_deref(),
        Some("ocr engine failed: vision request failed")
    );
}

#[tokio::test]
async fn unparseable_transcription_publishes_error_text() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(FailingOcr));
    coordinator
        .ingest_transcription(THREE_ENTRIES)
        .expect("ingest");

    let err = coordinator
        .ingest_transcription(r#"{"broken": ["#)
        .expect_err("parse fails");

    assert!(matches!(err, ExtractError::Json(_)));
    let state = coordinator.state();
    assert_eq!(state.generation, 2);
    assert!(state.time_series.is_empty());
    assert!(state.extracted_json.starts_with("JSON Parsing Error"));
    assert!(state.last_error.is_some());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn second_request_while_in_flight_is_rejected() {
    let dir = asset_dir();
    let (release_tx, release_rx) = mpsc::channel();
    let engine = Arc::new(GatedOcr {
        release: Mutex::new(release_rx),
    });
    let coordinator = Arc::new(coordinator(dir.path(), engine));
    let mut rx = coordinator.subscribe();

    let running = tokio::spawn({
        let coordinator = Arc::clone(&coordinator);
        async move { coordinator.extract().await }
    });
    rx.wait_for(|state| state.in_flight)
        .await
        .expect("in flight");

    assert!(matches!(coordinator.extract().await, Err(ExtractError::Busy)));
    assert!(matches!(
        coordinator.ingest_transcription(THREE_ENTRIES),
        Err(ExtractError::Busy)
    ));

    release_tx.send(()).expect("release");
    let state = running.await.expect("join").expect("extract");
    assert_eq!(state.generation, 1);
    assert_eq!(state.time_series.len(), 1);
    assert!(!coordinator.state().in_flight);
}

#[tokio::test]
async fn sidecar_transcript_replays_saved_ocr_output() {
    let dir = asset_dir();
    fs::write(
        dir.path().join("time_series_report.txt"),
        format!("{}\n{}\n", SERIES_FRAGMENTS[0], SERIES_FRAGMENTS[1]),
    )
    .expect("write transcript");
    let coordinator = coordinator(dir.path(), Arc::new(SidecarTextOcr));

    let state = coordinator.extract().await.expect("extract");
    assert_eq!(state.time_series.len(), 1);
    assert_eq!(state.time_series[0].value, 1.5);
}

#[tokio::test]
async fn selection_tracks_pointer_and_resets_on_new_data() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(FailingOcr));
    coordinator
        .ingest_transcription(THREE_ENTRIES)
        .expect("ingest");

    let query = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).single().expect("ts");
    let selection = coordinator.select_nearest(query).expect("selection");
    assert_eq!(selection.record_index, 1);
    assert_eq!(coordinator.state().selected, Some(selection));

    // 200px spans 200s, so x=190 lands on the last record.
    let selection = coordinator
        .select_at_x(190.0)
        .expect("select")
        .expect("selection");
    assert_eq!(selection.record_index, 2);

    coordinator.clear_selection();
    assert!(coordinator.state().selected.is_none());

    coordinator.select_nearest(query);
    coordinator
        .ingest_transcription(THREE_ENTRIES)
        .expect("ingest");
    assert!(coordinator.state().selected.is_none());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = ExtractorConfig::default().with_image_name("  ");
    let result = ExtractionCoordinator::new(config, Arc::new(FailingOcr));
    assert!(matches!(result, Err(ExtractError::Config(_))));
}

#[tokio::test]
async fn panicking_engine_surfaces_as_worker_join_error() {
    let dir = asset_dir();
    let coordinator = coordinator(dir.path(), Arc::new(PanickingOcr));
    coordinator
        .ingest_transcription(THREE_ENTRIES)
        .expect("seed records");

    let err = coordinator.extract().await.expect_err("worker panicked");

    assert!(matches!(err, ExtractError::WorkerJoin(_)));
    let state = coordinator.state();
    assert_eq!(state.generation, 1);
    assert_eq!(state.time_series.len(), 3);
    assert!(!state.in_flight);
    assert!(state.last_error.is_some());

    // The guard is released, so a later request is not rejected as busy.
    assert_eq!(
        coordinator
            .ingest_transcription(THREE_ENTRIES)
            .expect("second ingest")
            .generation,
        2
    );
}
