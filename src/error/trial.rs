// Per-trial error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Trial error code constants
///
/// These errors are fatal for the trial that raised them but recoverable
/// at batch level: the orchestrator logs the failure and continues with
/// the remaining trials.
///
/// Error code range: 2001-2006
pub struct TrialErrorCodes {}

impl TrialErrorCodes {
    /// Spindle code not covered by the calibration transform
    pub const UNSUPPORTED_SPINDLE: i32 = 2001;

    /// Instrument log line could not be parsed
    pub const MALFORMED_RECORD: i32 = 2002;

    /// Trial file name does not match the documented stem pattern
    pub const MALFORMED_FILENAME: i32 = 2003;

    /// Trial contains no samples
    pub const EMPTY_TRIAL: i32 = 2004;

    /// Midpoint sample reports a zero rotational speed
    pub const NOMINAL_SPEED_INVALID: i32 = 2005;

    /// Trial file could not be read
    pub const IO: i32 = 2006;
}

/// Log a trial error with structured context
pub fn log_trial_error(err: &TrialError, context: &str) {
    error!(
        "Trial error in {}: code={}, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Per-trial processing errors
///
/// These cover instrument-file parsing, filename metadata extraction,
/// nominal-speed resolution, and the calibration transform.
///
/// Error code range: 2001-2006
#[derive(Debug, Clone, PartialEq)]
pub enum TrialError {
    /// Spindle code not recognized by the calibration transform
    UnsupportedSpindle { code: u32 },

    /// A data line in the instrument log could not be parsed
    MalformedRecord { line: usize, reason: String },

    /// Trial file name does not match the documented stem pattern
    MalformedFilename { stem: String, reason: String },

    /// Trial contains no samples
    EmptyTrial,

    /// Midpoint sample reports a zero rotational speed
    NominalSpeedInvalid { speed_rpm: u32 },

    /// Trial file could not be read from disk
    Io { path: String, reason: String },
}

impl ErrorCode for TrialError {
    fn code(&self) -> i32 {
        match self {
            TrialError::UnsupportedSpindle { .. } => TrialErrorCodes::UNSUPPORTED_SPINDLE,
            TrialError::MalformedRecord { .. } => TrialErrorCodes::MALFORMED_RECORD,
            TrialError::MalformedFilename { .. } => TrialErrorCodes::MALFORMED_FILENAME,
            TrialError::EmptyTrial => TrialErrorCodes::EMPTY_TRIAL,
            TrialError::NominalSpeedInvalid { .. } => TrialErrorCodes::NOMINAL_SPEED_INVALID,
            TrialError::Io { .. } => TrialErrorCodes::IO,
        }
    }

    fn message(&self) -> String {
        match self {
            TrialError::UnsupportedSpindle { code } => {
                format!("Unsupported spindle code: {}", code)
            }
            TrialError::MalformedRecord { line, reason } => {
                format!("Malformed record at line {}: {}", line, reason)
            }
            TrialError::MalformedFilename { stem, reason } => {
                format!("Malformed file name '{}': {}", stem, reason)
            }
            TrialError::EmptyTrial => "Trial contains no samples".to_string(),
            TrialError::NominalSpeedInvalid { speed_rpm } => {
                format!("Invalid nominal spindle speed: {} rpm", speed_rpm)
            }
            TrialError::Io { path, reason } => {
                format!("Failed to read {}: {}", path, reason)
            }
        }
    }
}

impl fmt::Display for TrialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TrialError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for TrialError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_error_codes() {
        assert_eq!(
            TrialError::UnsupportedSpindle { code: 99 }.code(),
            TrialErrorCodes::UNSUPPORTED_SPINDLE
        );
        assert_eq!(
            TrialError::MalformedRecord {
                line: 3,
                reason: "test".to_string()
            }
            .code(),
            TrialErrorCodes::MALFORMED_RECORD
        );
        assert_eq!(
            TrialError::MalformedFilename {
                stem: "bad".to_string(),
                reason: "test".to_string()
            }
            .code(),
            TrialErrorCodes::MALFORMED_FILENAME
        );
        assert_eq!(TrialError::EmptyTrial.code(), TrialErrorCodes::EMPTY_TRIAL);
        assert_eq!(
            TrialError::NominalSpeedInvalid { speed_rpm: 0 }.code(),
            TrialErrorCodes::NOMINAL_SPEED_INVALID
        );
        assert_eq!(
            TrialError::Io {
                path: "x.txt".to_string(),
                reason: "gone".to_string()
            }
            .code(),
            TrialErrorCodes::IO
        );
    }

    #[test]
    fn test_trial_error_messages() {
        let err = TrialError::UnsupportedSpindle { code: 99 };
        assert_eq!(err.message(), "Unsupported spindle code: 99");

        let err = TrialError::MalformedRecord {
            line: 12,
            reason: "missing torque field".to_string(),
        };
        assert_eq!(
            err.message(),
            "Malformed record at line 12: missing torque field"
        );

        let err = TrialError::MalformedFilename {
            stem: "nonsense".to_string(),
            reason: "expected 4 fields".to_string(),
        };
        assert!(err.message().contains("nonsense"));

        let err = TrialError::EmptyTrial;
        assert!(err.message().contains("no samples"));

        let err = TrialError::NominalSpeedInvalid { speed_rpm: 0 };
        assert!(err.message().contains("0 rpm"));
    }

    #[test]
    fn test_trial_error_display() {
        let err = TrialError::EmptyTrial;
        let display = format!("{}", err);
        assert!(display.contains("TrialError"));
        assert!(display.contains(&err.code().to_string()));
    }
}
