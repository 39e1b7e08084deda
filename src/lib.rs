// Visco Trainer Core - viscometer trial analysis engine
// Steady-region segmentation and summary statistics for rotational
// viscometer measurement logs.

// Module declarations
pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod report;
pub mod trial;

// Re-exports for convenience
pub use analysis::{analyze_files, analyze_trial, analyze_trials, BatchOutcome, TrialInput};
pub use config::AnalysisConfig;
pub use trial::{RawSample, TrialMetadata, TrialSummary};

/// Initialize logging for CLI and test binaries.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::Builder::from_default_env().try_init();
}
