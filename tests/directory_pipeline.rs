//! End-to-end runs over real recording directories.

use ctgscore::decode::{DictDecoder, JsonDecoder};
use ctgscore::pipeline::{CollectorReporter, Pipeline, PipelineConfig, ScoringStation};
use ctgscore::signal::{AnalysisConfig, FisherAnalyzer, Grade, TrailingRun};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

fn config(readers: usize, workers: usize) -> PipelineConfig {
    PipelineConfig {
        readers,
        workers,
        poll_interval: Duration::from_millis(10),
    }
}

fn dict_text(values: &[f64]) -> String {
    let records: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!("{{'Key': {}, 'Value': {}}}", i, v))
        .collect();
    format!("[{}]", records.join(", "))
}

fn json_text(values: &[f64]) -> String {
    let records: Vec<serde_json::Value> = values
        .iter()
        .enumerate()
        .map(|(i, v)| serde_json::json!({ "Key": i, "Value": v }))
        .collect();
    serde_json::to_string(&records).unwrap()
}

fn alternating() -> Vec<f64> {
    (0..200).map(|i| if i % 2 == 0 { 135.0 } else { 145.0 }).collect()
}

fn write(dir: &Path, name: &str, contents: &str) {
    fs::write(dir.join(name), contents).unwrap();
}

#[test]
fn grades_good_and_poor_recordings() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.txt", &dict_text(&alternating()));
    write(dir.path(), "flat.txt", &dict_text(&[140.0; 200]));

    let results = Pipeline::new(config(2, 2))
        .score(dir.path(), Arc::new(DictDecoder), FisherAnalyzer::default())
        .unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results["good.txt"], Grade::Good);
    assert_eq!(results["flat.txt"], Grade::Poor);
}

#[test]
fn every_decoded_file_has_one_entry_for_any_worker_count() {
    let dir = TempDir::new().unwrap();
    for i in 0..23 {
        write(dir.path(), &format!("{i}.txt"), &dict_text(&alternating()));
    }

    for (readers, workers) in [(1, 1), (3, 1), (1, 5), (8, 8), (30, 2)] {
        let results = Pipeline::new(config(readers, workers))
            .score(dir.path(), Arc::new(DictDecoder), FisherAnalyzer::default())
            .unwrap();
        assert_eq!(results.len(), 23, "readers={readers} workers={workers}");
    }
}

#[test]
fn termination_markers_match_worker_count() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "only.txt", &dict_text(&[150.0]));

    for workers in [1, 2, 7, 32] {
        let run = Pipeline::new(config(4, workers))
            .run(dir.path(), Arc::new(DictDecoder), ScoringStation::default())
            .unwrap();
        assert_eq!(run.finished_workers, workers);
        assert_eq!(run.outputs.len(), 1);
    }
}

#[test]
fn defective_inputs_are_skipped_and_reported() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "ok.txt", &dict_text(&alternating()));
    write(dir.path(), "corrupt.txt", "[{'Key': 0, 'Value': ");
    write(dir.path(), "none.txt", "[{'Key': 0, 'Value': None}]");
    write(dir.path(), "empty.txt", "[]");
    fs::create_dir(dir.path().join("nested")).unwrap();

    let reporter = Arc::new(CollectorReporter::new());
    let run = Pipeline::new(config(2, 3))
        .with_error_reporter(reporter.clone())
        .run(dir.path(), Arc::new(DictDecoder), ScoringStation::default())
        .unwrap();

    let graded: Vec<&str> = run.outputs.iter().map(|g| g.filename.as_str()).collect();
    assert_eq!(graded, vec!["ok.txt"]);
    assert_eq!(run.ingest.listed, 5);
    assert_eq!(run.ingest.enqueued, 1);
    assert_eq!(run.ingest.skipped, 4);
    assert_eq!(reporter.len(), 4);
}

#[test]
fn json_recordings_decode_and_grade() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "1.json", &json_text(&alternating()));

    let results = Pipeline::new(config(1, 1))
        .score(dir.path(), Arc::new(JsonDecoder), FisherAnalyzer::default())
        .unwrap();

    assert_eq!(results["1.json"], Grade::Good);
}

#[test]
fn single_sample_recording_has_no_events() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "one.txt", &dict_text(&[150.0]));

    let analyzer = FisherAnalyzer::default();
    let run = Pipeline::new(config(1, 1))
        .run(dir.path(), Arc::new(DictDecoder), ScoringStation::new(analyzer.clone()))
        .unwrap();
    assert_eq!(run.outputs.len(), 1);

    let analysis = analyzer.analyze(&ctgscore::Recording::from_values([150.0]));
    assert_eq!(analysis.metrics.basal_rhythm, 150.0);
    assert_eq!(analysis.metrics.amplitude, 0.0);
    assert_eq!(analysis.metrics.variability, 0);
    assert_eq!(analysis.metrics.accelerations, 0);
    assert_eq!(analysis.metrics.decelerations, 0);
}

#[test]
fn discard_policy_leaves_unclosed_flat_window_unscored() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "flat.txt", &dict_text(&[140.0; 200]));

    let discard = FisherAnalyzer::new(AnalysisConfig {
        trailing_run: TrailingRun::Discard,
        ..AnalysisConfig::default()
    });
    let results = Pipeline::new(config(1, 2))
        .score(dir.path(), Arc::new(DictDecoder), discard.clone())
        .unwrap();
    assert_eq!(results["flat.txt"], Grade::Poor);

    // The only window never closes, so Discard finds no basal rhythm
    let flat = ctgscore::Recording::from_values([140.0; 200]);
    assert_eq!(discard.analyze(&flat).metrics.basal_rhythm, 0.0);
    assert_eq!(
        FisherAnalyzer::default().analyze(&flat).metrics.basal_rhythm,
        140.0
    );
}

#[test]
fn deeply_nested_file_is_skipped_without_aborting() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.txt", &dict_text(&alternating()));
    write(dir.path(), "nested.txt", &"[".repeat(200_000));

    let reporter = Arc::new(CollectorReporter::new());
    let results = Pipeline::new(config(2, 2))
        .with_error_reporter(reporter.clone())
        .score(dir.path(), Arc::new(DictDecoder), FisherAnalyzer::default())
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results["good.txt"], Grade::Good);
    assert_eq!(reporter.len(), 1);
    let reports = reporter.reports();
    let (station, error) = &reports[0];
    assert_eq!(station, "reader");
    assert!(error.to_string().contains("nesting too deep"), "got: {}", error);
}

#[test]
fn reader_continues_past_non_regular_entry() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.txt", &dict_text(&alternating()));
    fs::create_dir(dir.path().join("b")).unwrap();
    write(dir.path(), "c.txt", &dict_text(&alternating()));

    let reporter = Arc::new(CollectorReporter::new());
    let run = Pipeline::new(config(1, 1))
        .with_error_reporter(reporter.clone())
        .run(dir.path(), Arc::new(DictDecoder), ScoringStation::default())
        .unwrap();

    let mut graded: Vec<&str> = run.outputs.iter().map(|g| g.filename.as_str()).collect();
    graded.sort();
    assert_eq!(graded, vec!["a.txt", "c.txt"]);
    assert_eq!(run.ingest.listed, 3);
    assert_eq!(run.ingest.enqueued, 2);
    assert_eq!(run.ingest.skipped, 1);
    assert_eq!(reporter.len(), 1);
}
