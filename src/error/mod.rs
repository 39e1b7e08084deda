// Error types for the viscometer trial analyzer
//
// This module defines custom error types for configuration and per-trial
// processing, providing structured error handling with stable numeric codes
// suitable for batch failure reports.

mod config;
mod trial;

pub use config::{log_config_error, ConfigError, ConfigErrorCodes};
pub use trial::{log_trial_error, TrialError, TrialErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling in batch
/// reports and logs.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
