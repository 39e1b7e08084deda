// Calibration - torque percentage to viscosity conversion
//
// The instrument reports torque as a percentage of the spindle's full-scale
// range. Full scale corresponds to a maximum measurable viscosity that
// depends on the spindle geometry and the rotational speed:
//
//   max_viscosity = round2(K / nominal_speed)   K = 307 (spindle 40)
//                                               K = 4854 (spindle 52)
//   viscosity     = round2(max_viscosity * torque_pct / 100)
//
// Rounding to two decimals happens immediately after the division, before
// the multiply. The instrument's own readout rounds the constant the same
// way, so calibrated values only reproduce the readout if the order is kept.

use serde::{Deserialize, Serialize};

use crate::error::TrialError;

/// Supported spindle types, identified by instrument code
///
/// Only the two cone spindles used in the lab are calibrated. Any other
/// code is an error; there is no silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spindle {
    /// Cone spindle 40 (low-range, full scale 307/N mPa·s at N rpm)
    S40,
    /// Cone spindle 52 (high-range, full scale 4854/N mPa·s at N rpm)
    S52,
}

impl Spindle {
    /// Resolve a spindle from its instrument code
    ///
    /// # Returns
    /// * `Ok(Spindle)` for codes 40 and 52
    /// * `Err(TrialError::UnsupportedSpindle)` for anything else
    pub fn from_code(code: u32) -> Result<Self, TrialError> {
        match code {
            40 => Ok(Spindle::S40),
            52 => Ok(Spindle::S52),
            _ => Err(TrialError::UnsupportedSpindle { code }),
        }
    }

    /// Instrument code for this spindle
    pub fn code(&self) -> u32 {
        match self {
            Spindle::S40 => 40,
            Spindle::S52 => 52,
        }
    }

    /// Full-scale torque constant K in mPa·s·rpm
    fn torque_constant(&self) -> f64 {
        match self {
            Spindle::S40 => 307.0,
            Spindle::S52 => 4854.0,
        }
    }

    /// Maximum measurable viscosity at the given nominal speed, in mPa·s
    ///
    /// Rounded to two decimals immediately; callers must multiply the
    /// rounded value, never the raw quotient.
    ///
    /// # Arguments
    /// * `nominal_speed_rpm` - Nominal rotational speed, must be positive
    pub fn max_viscosity(&self, nominal_speed_rpm: u32) -> f64 {
        round2(self.torque_constant() / nominal_speed_rpm as f64)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Convert a raw torque percentage into a calibrated viscosity in mPa·s
///
/// # Arguments
/// * `max_viscosity` - Full-scale viscosity from `Spindle::max_viscosity`
/// * `torque_pct` - Raw torque reading on the 0-100 scale
pub fn calibrate_torque(max_viscosity: f64, torque_pct: f64) -> f64 {
    round2(max_viscosity * (torque_pct / 100.0))
}
