// Analysis module - per-trial pipeline and batch orchestration
//
// This module drives one trial's raw samples through the full analysis
// pipeline and collects results across a batch of trials:
//
// Pipeline: nominal-speed filter → calibration → windowed stdev →
//           steadiness classifier → summary statistics → TrialSummary
//
// Trials are independent; the batch orchestrator owns the only cross-trial
// state, an append-only list of summaries plus a list of per-trial
// failures. A failed trial is logged and skipped, never aborts the batch.
// Invalid configuration aborts the run before any trial is touched.

use std::path::PathBuf;

use log::{info, warn};
use serde::Serialize;

use crate::calibration::{calibrate_torque, Spindle};
use crate::config::AnalysisConfig;
use crate::error::{log_config_error, log_trial_error, ConfigError, ErrorCode, TrialError};
use crate::trial::{
    parse_file_name, read_instrument_file, resolve_nominal_speed, RawSample, TrialMetadata,
    TrialSummary,
};

pub mod classifier;
pub mod summary;
pub mod windowed;

use classifier::{select_samples, steady_centers};
use summary::summarize;
use windowed::compute_windowed_stdev;

/// One trial's raw input: instrument samples plus filename metadata
#[derive(Debug, Clone)]
pub struct TrialInput {
    pub samples: Vec<RawSample>,
    pub metadata: TrialMetadata,
}

/// A trial the batch skipped, with the error that killed it
#[derive(Debug, Clone)]
pub struct TrialFailure {
    pub source_name: String,
    pub error: TrialError,
}

impl TrialFailure {
    /// Flat record for serialized failure reports
    pub fn to_record(&self) -> FailureRecord {
        FailureRecord {
            source_name: self.source_name.clone(),
            code: self.error.code(),
            message: self.error.message(),
        }
    }
}

/// Serializable per-trial failure entry
#[derive(Debug, Clone, Serialize)]
pub struct FailureRecord {
    pub source_name: String,
    pub code: i32,
    pub message: String,
}

/// Result of a batch run: completed summaries plus skipped trials
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub summaries: Vec<TrialSummary>,
    pub failures: Vec<TrialFailure>,
}

impl BatchOutcome {
    pub fn record_failure(&mut self, source_name: &str, error: TrialError) {
        log_trial_error(&error, source_name);
        self.failures.push(TrialFailure {
            source_name: source_name.to_string(),
            error,
        });
    }
}

/// Analyze a single trial
///
/// Stage-local errors propagate untouched; the caller decides whether
/// they are per-trial or whole-run fatal.
///
/// # Arguments
/// * `input` - Raw samples and metadata for one trial
/// * `config` - Validated analysis configuration
pub fn analyze_trial(
    input: &TrialInput,
    config: &AnalysisConfig,
) -> Result<TrialSummary, TrialError> {
    let nominal_speed_rpm = resolve_nominal_speed(&input.samples)?;
    let spindle = Spindle::from_code(input.metadata.spindle_code)?;
    let max_viscosity = spindle.max_viscosity(nominal_speed_rpm);

    // Spin-up and spin-down readings at other speeds are excluded before
    // calibration; index order of the survivors is still time order
    let calibrated: Vec<f64> = input
        .samples
        .iter()
        .filter(|s| s.speed_rpm == nominal_speed_rpm)
        .map(|s| calibrate_torque(max_viscosity, s.torque_pct))
        .collect();

    let stat = compute_windowed_stdev(&calibrated, config.steadiness.window_size);
    let centers = steady_centers(&stat, config.steadiness.threshold);
    let included = select_samples(&calibrated, &centers);
    let stats = summarize(&included);

    let steady_region_found = !included.is_empty();
    if !steady_region_found {
        warn!(
            "[Batch] Trial '{}': no steady region found (statistics are NaN)",
            input.metadata.source_name
        );
    }

    Ok(TrialSummary {
        metadata: input.metadata.clone(),
        nominal_speed_rpm,
        spindle,
        sample_count: calibrated.len(),
        steady_sample_count: included.len(),
        stats,
        steady_region_found,
        window_size: config.steadiness.window_size,
        threshold: config.steadiness.threshold,
    })
}

/// Analyze a batch of already-loaded trials
///
/// # Returns
/// * `Ok(BatchOutcome)` - Summaries for completed trials, failures for
///   skipped ones
/// * `Err(ConfigError)` - Configuration invalid, nothing was processed
pub fn analyze_trials(
    trials: &[TrialInput],
    config: &AnalysisConfig,
) -> Result<BatchOutcome, ConfigError> {
    if let Err(err) = config.validate() {
        log_config_error(&err, "analyze_trials");
        return Err(err);
    }

    let mut outcome = BatchOutcome::default();
    for input in trials {
        match analyze_trial(input, config) {
            Ok(summary) => outcome.summaries.push(summary),
            Err(err) => outcome.record_failure(&input.metadata.source_name, err),
        }
    }

    info!(
        "[Batch] Analyzed {} trials: {} completed, {} skipped",
        trials.len(),
        outcome.summaries.len(),
        outcome.failures.len()
    );
    Ok(outcome)
}

/// Analyze a batch of trial files from disk
///
/// File name metadata extraction and instrument parsing failures are
/// per-trial: the file is recorded as a failure and the batch continues.
pub fn analyze_files(
    paths: &[PathBuf],
    config: &AnalysisConfig,
) -> Result<BatchOutcome, ConfigError> {
    if let Err(err) = config.validate() {
        log_config_error(&err, "analyze_files");
        return Err(err);
    }

    let mut outcome = BatchOutcome::default();
    for path in paths {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let metadata = match parse_file_name(&name) {
            Ok(metadata) => metadata,
            Err(err) => {
                outcome.record_failure(&name, err);
                continue;
            }
        };

        let samples = match read_instrument_file(path) {
            Ok(samples) => samples,
            Err(err) => {
                outcome.record_failure(&name, err);
                continue;
            }
        };

        let input = TrialInput { samples, metadata };
        match analyze_trial(&input, config) {
            Ok(summary) => outcome.summaries.push(summary),
            Err(err) => outcome.record_failure(&name, err),
        }
    }

    info!(
        "[Batch] Analyzed {} files: {} completed, {} skipped",
        paths.len(),
        outcome.summaries.len(),
        outcome.failures.len()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(speed_rpm: u32, torque_pct: f64) -> RawSample {
        RawSample {
            speed_rpm,
            torque_pct,
            viscosity_code: 0.0,
        }
    }

    fn metadata(name: &str, spindle_code: u32) -> TrialMetadata {
        TrialMetadata {
            temperature_c: 25.0,
            date: "2026-08-12".to_string(),
            fluid: "glycerol".to_string(),
            trial_number: 1,
            spindle_code,
            source_name: name.to_string(),
        }
    }

    fn config(window_size: usize, threshold: f64) -> AnalysisConfig {
        let mut config = AnalysisConfig::default();
        config.steadiness.window_size = window_size;
        config.steadiness.threshold = threshold;
        config
    }

    #[test]
    fn test_constant_trial_is_fully_steady() {
        // Spindle 40 at 60 rpm: max viscosity 5.12; constant 50% torque
        // calibrates to 2.56 everywhere, stdev 0 at every window
        let input = TrialInput {
            samples: (0..10).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("t1", 40),
        };
        let summary = analyze_trial(&input, &config(4, 0.05)).unwrap();

        assert_eq!(summary.nominal_speed_rpm, 60);
        assert_eq!(summary.spindle, Spindle::S40);
        assert_eq!(summary.sample_count, 10);
        // 10 - 2*radius = 6 window positions, all steady
        assert_eq!(summary.steady_sample_count, 6);
        assert!(summary.steady_region_found);
        assert_eq!(summary.stats.mean, 2.56);
        assert_eq!(summary.stats.stdev, 0.0);
        assert_eq!(summary.stats.lower_bound, 2.56);
        assert_eq!(summary.stats.upper_bound, 2.56);
    }

    #[test]
    fn test_spin_up_samples_are_excluded_before_calibration() {
        let mut samples: Vec<RawSample> = vec![sample(12, 10.0), sample(45, 30.0)];
        samples.extend((0..8).map(|_| sample(60, 50.0)));
        let input = TrialInput {
            samples,
            metadata: metadata("t1", 40),
        };
        let summary = analyze_trial(&input, &config(4, 0.05)).unwrap();

        assert_eq!(summary.nominal_speed_rpm, 60);
        assert_eq!(summary.sample_count, 8);
        assert_eq!(summary.stats.mean, 2.56);
    }

    #[test]
    fn test_zero_threshold_yields_nan_summary_not_error() {
        // Threshold 0 selects nothing even from zero-variance windows
        // (strict <); the NaN summary must survive into the record
        let input = TrialInput {
            samples: (0..10).map(|i| sample(60, 50.0 + (i % 3) as f64)).collect(),
            metadata: metadata("t1", 40),
        };
        let summary = analyze_trial(&input, &config(4, 0.0)).unwrap();
        assert!(!summary.steady_region_found);
        assert_eq!(summary.steady_sample_count, 0);
        assert!(summary.stats.mean.is_nan());
        assert!(summary.stats.stdev.is_nan());
        assert!(summary.stats.lower_bound.is_nan());
        assert!(summary.stats.upper_bound.is_nan());
    }

    #[test]
    fn test_unsupported_spindle_fails_the_trial() {
        let input = TrialInput {
            samples: (0..10).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("t1", 61),
        };
        let err = analyze_trial(&input, &config(4, 0.05)).unwrap_err();
        assert_eq!(err, TrialError::UnsupportedSpindle { code: 61 });
    }

    #[test]
    fn test_batch_continues_past_failed_trials() {
        let good = TrialInput {
            samples: (0..10).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("good", 40),
        };
        let empty = TrialInput {
            samples: Vec::new(),
            metadata: metadata("empty", 40),
        };
        let bad_spindle = TrialInput {
            samples: (0..10).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("bad_spindle", 7),
        };

        let outcome =
            analyze_trials(&[empty, good, bad_spindle], &config(4, 0.05)).unwrap();

        assert_eq!(outcome.summaries.len(), 1);
        assert_eq!(outcome.summaries[0].metadata.source_name, "good");
        assert_eq!(outcome.failures.len(), 2);
        assert_eq!(outcome.failures[0].source_name, "empty");
        assert_eq!(outcome.failures[0].error, TrialError::EmptyTrial);
        assert_eq!(
            outcome.failures[1].error,
            TrialError::UnsupportedSpindle { code: 7 }
        );
    }

    #[test]
    fn test_invalid_config_aborts_whole_run() {
        let good = TrialInput {
            samples: (0..10).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("good", 40),
        };
        let err = analyze_trials(&[good], &config(0, 0.05)).unwrap_err();
        assert_eq!(err, ConfigError::WindowSizeInvalid { window_size: 0 });
    }

    #[test]
    fn test_window_larger_than_trial_yields_nan_summary() {
        let input = TrialInput {
            samples: (0..5).map(|_| sample(60, 50.0)).collect(),
            metadata: metadata("short", 40),
        };
        let summary = analyze_trial(&input, &config(150, 0.05)).unwrap();
        assert!(!summary.steady_region_found);
        assert!(summary.stats.mean.is_nan());
    }

    #[test]
    fn test_failure_record_carries_code_and_message() {
        let failure = TrialFailure {
            source_name: "t".to_string(),
            error: TrialError::EmptyTrial,
        };
        let record = failure.to_record();
        assert_eq!(record.code, 2004);
        assert!(record.message.contains("no samples"));
    }
}
