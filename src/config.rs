//! Configuration management for analysis parameter tuning
//!
//! This module provides runtime configuration loading from JSON files,
//! enabling parameter sweeps without recompilation. The steadiness window
//! size and threshold are the two knobs that determine how aggressively a
//! trial is segmented into steady and unsteady regions.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub steadiness: SteadinessConfig,
    pub sampling: SamplingConfig,
}

/// Steady-region segmentation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SteadinessConfig {
    /// Moving window size in samples for the windowed standard deviation
    pub window_size: usize,
    /// A window position counts as steady when its standard deviation is
    /// strictly below this value (same units as the measurement, mPa·s)
    pub threshold: f64,
}

impl Default for SteadinessConfig {
    fn default() -> Self {
        Self {
            window_size: 150,
            threshold: 0.05,
        }
    }
}

/// Instrument sampling parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Instrument sample rate in Hz, used only to convert sample indices
    /// to time for reporting; never consulted by the core computation
    pub sample_rate_hz: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { sample_rate_hz: 1.0 }
    }
}

impl Default for AnalysisConfig {
    /// Default configuration values (fallback if config file not found)
    fn default() -> Self {
        Self {
            steadiness: SteadinessConfig::default(),
            sampling: SamplingConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// Loaded configuration, or the default configuration if the file does
    /// not exist or contains invalid JSON (a warning is logged either way).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Validate configuration before a batch run
    ///
    /// A non-positive window size or threshold would misclassify every
    /// trial, so validation failure aborts the whole run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.steadiness.window_size == 0 {
            return Err(ConfigError::WindowSizeInvalid {
                window_size: self.steadiness.window_size,
            });
        }
        if !(self.steadiness.threshold > 0.0) {
            return Err(ConfigError::ThresholdInvalid {
                threshold: self.steadiness.threshold,
            });
        }
        if !(self.sampling.sample_rate_hz > 0.0) {
            return Err(ConfigError::SampleRateInvalid {
                sample_rate_hz: self.sampling.sample_rate_hz,
            });
        }
        Ok(())
    }
}
