// Trial module - raw instrument records, metadata, and per-trial results
//
// The instrument writes one plain-text log per trial; the file name stem
// carries the trial metadata. This module owns the record types plus the
// thin I/O helpers that turn a file into a RawSample sequence:
//
// - reader: instrument log text -> Vec<RawSample>
// - metadata: file name stem -> TrialMetadata
// - speed: RawSample sequence -> nominal spindle speed

use serde::{Deserialize, Serialize};

use crate::analysis::summary::SummaryStats;
use crate::calibration::Spindle;

pub mod metadata;
pub mod reader;
pub mod speed;

pub use metadata::parse_file_name;
pub use reader::{parse_instrument_text, read_instrument_file};
pub use speed::resolve_nominal_speed;

/// One raw instrument reading, immutable once read
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawSample {
    /// Rotational speed reported for this sample, rpm
    pub speed_rpm: u32,
    /// Raw torque reading on the 0-100 scale
    pub torque_pct: f64,
    /// Instrument's own viscosity readout, mPa·s (superseded by the
    /// recalibration from torque, kept for inspection)
    pub viscosity_code: f64,
}

/// Trial identity fields extracted from the file name stem
///
/// Pass-through for the analysis core; only `spindle_code` feeds the
/// calibration transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialMetadata {
    /// Bath temperature, °C
    pub temperature_c: f64,
    /// Measurement date, as written in the file name
    pub date: String,
    /// Fluid under test
    pub fluid: String,
    /// Trial number within the fluid/temperature series
    pub trial_number: u32,
    /// Instrument spindle code (40 or 52)
    pub spindle_code: u32,
    /// Original file name, for failure reports
    pub source_name: String,
}

/// One record per analyzed trial, appended to the batch result set
///
/// Immutable after creation. Statistics are NaN when the classifier
/// selected zero samples; `steady_region_found` makes that case visible
/// in serialized output where NaN becomes `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub metadata: TrialMetadata,
    /// Nominal spindle speed resolved from the midpoint sample, rpm
    pub nominal_speed_rpm: u32,
    pub spindle: Spindle,
    /// Calibrated samples at the nominal speed
    pub sample_count: usize,
    /// Samples classified as steady
    pub steady_sample_count: usize,
    pub stats: SummaryStats,
    /// False when the classifier selected zero samples (statistics NaN)
    pub steady_region_found: bool,
    /// Window size used for this trial's segmentation
    pub window_size: usize,
    /// Steadiness threshold used for this trial's segmentation
    pub threshold: f64,
}
