// Nominal-speed resolver
//
// A trial runs at a single nominal spindle speed, but the first readings
// are taken while the motor is still spinning up. The midpoint sample is
// assumed to be past spin-up and its speed is taken as the trial's nominal
// speed; samples at any other speed are excluded before calibration.

use crate::error::TrialError;
use crate::trial::RawSample;

/// Resolve the nominal spindle speed of a trial
///
/// # Returns
/// * `Ok(speed)` - Speed of the midpoint sample, rpm
/// * `Err(TrialError::EmptyTrial)` - No samples
/// * `Err(TrialError::NominalSpeedInvalid)` - Midpoint sample reports
///   0 rpm (the calibration constants divide by the nominal speed)
pub fn resolve_nominal_speed(samples: &[RawSample]) -> Result<u32, TrialError> {
    if samples.is_empty() {
        return Err(TrialError::EmptyTrial);
    }

    let speed = samples[samples.len() / 2].speed_rpm;
    if speed == 0 {
        return Err(TrialError::NominalSpeedInvalid { speed_rpm: speed });
    }

    Ok(speed)
}
