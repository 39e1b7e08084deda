// Configuration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Configuration error code constants
///
/// These constants provide a single source of truth for error codes
/// recorded in batch failure reports and logs.
///
/// Error code range: 1001-1003
pub struct ConfigErrorCodes {}

impl ConfigErrorCodes {
    /// Window size must be a positive sample count
    pub const WINDOW_SIZE_INVALID: i32 = 1001;

    /// Steadiness threshold must be positive
    pub const THRESHOLD_INVALID: i32 = 1002;

    /// Sample rate must be positive
    pub const SAMPLE_RATE_INVALID: i32 = 1003;
}

/// Log a configuration error with structured context
pub fn log_config_error(err: &ConfigError, context: &str) {
    error!(
        "Configuration error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Configuration errors
///
/// Any of these aborts the whole run before a single trial is processed:
/// a bad window size or threshold would silently corrupt every trial's
/// classification, so there is no per-trial recovery.
///
/// Error code range: 1001-1003
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Window size is zero (must be a positive sample count)
    WindowSizeInvalid { window_size: usize },

    /// Steadiness threshold is zero or negative
    ThresholdInvalid { threshold: f64 },

    /// Sample rate is zero or negative
    SampleRateInvalid { sample_rate_hz: f64 },
}

impl ErrorCode for ConfigError {
    fn code(&self) -> i32 {
        match self {
            ConfigError::WindowSizeInvalid { .. } => ConfigErrorCodes::WINDOW_SIZE_INVALID,
            ConfigError::ThresholdInvalid { .. } => ConfigErrorCodes::THRESHOLD_INVALID,
            ConfigError::SampleRateInvalid { .. } => ConfigErrorCodes::SAMPLE_RATE_INVALID,
        }
    }

    fn message(&self) -> String {
        match self {
            ConfigError::WindowSizeInvalid { window_size } => {
                format!("Invalid window size: {} (must be positive)", window_size)
            }
            ConfigError::ThresholdInvalid { threshold } => {
                format!(
                    "Invalid steadiness threshold: {} (must be positive)",
                    threshold
                )
            }
            ConfigError::SampleRateInvalid { sample_rate_hz } => {
                format!(
                    "Invalid sample rate: {} Hz (must be positive)",
                    sample_rate_hz
                )
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ConfigError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for ConfigError {}
