//! Integration tests for the batch analysis pipeline
//!
//! These tests exercise the full path from instrument log text through
//! calibration, steady-region segmentation, and summary statistics,
//! including:
//! - End-to-end analysis of synthetic trial files on disk
//! - Per-trial failure recovery at batch level
//! - NaN propagation for trials with no steady region

use std::fs;
use std::path::PathBuf;

use visco_trainer::analysis::analyze_files;
use visco_trainer::config::AnalysisConfig;
use visco_trainer::error::{ErrorCode, TrialErrorCodes};
use visco_trainer::trial::parse_instrument_text;

/// Create a scratch directory under the system temp dir
fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("visco_trainer_{}_{}", tag, std::process::id()));
    fs::create_dir_all(&dir).expect("failed to create scratch dir");
    dir
}

/// Render a trial log: a header line, spin-up readings, then `n` readings
/// at 60 rpm with the given torque values
fn trial_log(torques: &[f64]) -> String {
    let mut text = String::from("Viscometer trial log\n12 rpm 0.10 mPas 2.0 %\n");
    for &torque in torques {
        text.push_str(&format!("60 rpm 0.00 mPas {} %\n", torque));
    }
    text
}

fn test_config(window_size: usize, threshold: f64) -> AnalysisConfig {
    let mut config = AnalysisConfig::default();
    config.steadiness.window_size = window_size;
    config.steadiness.threshold = threshold;
    config
}

/// Steady trial end to end: constant torque at spindle 40 / 60 rpm must
/// calibrate to 2.56 mPa·s and come out fully steady
#[test]
fn test_steady_trial_end_to_end() {
    let dir = scratch_dir("steady");
    let path = dir.join("25C_2026-08-12_glycerol_1_s40.txt");
    fs::write(&path, trial_log(&[50.0; 12])).unwrap();

    let outcome = analyze_files(&[path.clone()], &test_config(4, 0.05)).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert!(outcome.failures.is_empty());
    assert_eq!(outcome.summaries.len(), 1);

    let summary = &outcome.summaries[0];
    assert_eq!(summary.metadata.fluid, "glycerol");
    assert_eq!(summary.nominal_speed_rpm, 60);
    assert_eq!(summary.sample_count, 12);
    assert!(summary.steady_region_found);
    assert_eq!(summary.stats.mean, 2.56);
    assert_eq!(summary.stats.stdev, 0.0);
    assert_eq!(summary.stats.lower_bound, 2.56);
    assert_eq!(summary.stats.upper_bound, 2.56);
}

/// A malformed trial file is skipped with a failure record while the
/// healthy trial in the same batch still completes
#[test]
fn test_malformed_trial_does_not_abort_batch() {
    let dir = scratch_dir("malformed");
    let good = dir.join("25C_2026-08-12_glycerol_1_s40.txt");
    let broken = dir.join("25C_2026-08-12_glycerol_2_s40.txt");
    fs::write(&good, trial_log(&[50.0; 12])).unwrap();
    // Second data line is missing its torque field
    fs::write(
        &broken,
        "60 rpm 0.00 mPas 50.0 %\n60 rpm 0.00 mPas\n",
    )
    .unwrap();

    let outcome =
        analyze_files(&[broken.clone(), good.clone()], &test_config(4, 0.05)).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert_eq!(outcome.summaries.len(), 1);
    assert_eq!(
        outcome.summaries[0].metadata.source_name,
        "25C_2026-08-12_glycerol_1_s40.txt"
    );
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(
        outcome.failures[0].error.code(),
        TrialErrorCodes::MALFORMED_RECORD
    );
}

/// A file name outside the documented stem schema is a reportable
/// failure, not undefined slicing
#[test]
fn test_malformed_filename_is_reported() {
    let dir = scratch_dir("filename");
    let path = dir.join("notes.txt");
    fs::write(&path, trial_log(&[50.0; 12])).unwrap();

    let outcome = analyze_files(&[path], &test_config(4, 0.05)).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert!(outcome.summaries.is_empty());
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(
        outcome.failures[0].error.code(),
        TrialErrorCodes::MALFORMED_FILENAME
    );
}

/// An unsteady trial (high variance, tight threshold) must surface NaN
/// statistics with the steady flag down, never zeros
#[test]
fn test_unsteady_trial_reports_nan_statistics() {
    let dir = scratch_dir("unsteady");
    let path = dir.join("25C_2026-08-12_glycerol_1_s40.txt");
    let torques: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 20.0 } else { 80.0 }).collect();
    fs::write(&path, trial_log(&torques)).unwrap();

    let outcome = analyze_files(&[path], &test_config(4, 0.05)).unwrap();
    fs::remove_dir_all(&dir).ok();

    assert_eq!(outcome.summaries.len(), 1);
    let summary = &outcome.summaries[0];
    assert!(!summary.steady_region_found);
    assert_eq!(summary.steady_sample_count, 0);
    assert!(summary.stats.mean.is_nan());
    assert!(summary.stats.upper_bound.is_nan());
}

/// Spindle 52 files use the high-range calibration constant
#[test]
fn test_spindle_52_calibration_end_to_end() {
    let dir = scratch_dir("spindle52");
    let path = dir.join("25C_2026-08-12_honey_1_s52.txt");
    fs::write(&path, trial_log(&[50.0; 12])).unwrap();

    let outcome = analyze_files(&[path], &test_config(4, 0.05)).unwrap();
    fs::remove_dir_all(&dir).ok();

    // 4854 / 60 = 80.9 full scale; 50% torque -> 40.45
    assert_eq!(outcome.summaries.len(), 1);
    assert_eq!(outcome.summaries[0].stats.mean, 40.45);
}

/// The in-memory parser and the batch pipeline agree on sample counts
#[test]
fn test_parser_counts_match_summary() {
    let text = trial_log(&[50.0; 9]);
    let samples = parse_instrument_text(&text).unwrap();

    // One spin-up sample at 12 rpm plus nine at 60 rpm
    assert_eq!(samples.len(), 10);
    assert_eq!(samples.iter().filter(|s| s.speed_rpm == 60).count(), 9);
}
