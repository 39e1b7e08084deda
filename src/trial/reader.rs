// Instrument log reader - plain text to RawSample sequence
//
// The viscometer logs one reading per line, each value annotated with its
// unit, in fixed order:
//
//   60 rpm   2.56 mPas   50.0 %
//
// One uniform line parser is applied to every line: lines without an
// "rpm" marker (headers, footers, blanks) are skipped; a line that has the
// marker but cannot produce all three values fails the whole trial with
// the offending line number.

use std::fs;
use std::path::Path;

use crate::error::TrialError;
use crate::trial::RawSample;

/// Unit markers, in the order they appear on a data line
const SPEED_UNIT: &str = "rpm";
const VISCOSITY_UNIT: &str = "mPas";
const TORQUE_UNIT: &str = "%";

/// Read and parse an instrument log file
///
/// # Returns
/// * `Ok(Vec<RawSample>)` - Parsed samples in file (time) order
/// * `Err(TrialError::Io)` - File could not be read
/// * `Err(TrialError::MalformedRecord)` - A data line could not be parsed
pub fn read_instrument_file<P: AsRef<Path>>(path: P) -> Result<Vec<RawSample>, TrialError> {
    let text = fs::read_to_string(&path).map_err(|err| TrialError::Io {
        path: path.as_ref().display().to_string(),
        reason: err.to_string(),
    })?;
    parse_instrument_text(&text)
}

/// Parse instrument log text into samples
///
/// # Arguments
/// * `text` - Full contents of one trial's log
pub fn parse_instrument_text(text: &str) -> Result<Vec<RawSample>, TrialError> {
    let mut samples = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let line_no = idx + 1;
        if let Some(sample) = parse_line(line, line_no)? {
            samples.push(sample);
        }
    }

    Ok(samples)
}

/// Parse one line; `Ok(None)` for non-data lines
fn parse_line(line: &str, line_no: usize) -> Result<Option<RawSample>, TrialError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();

    // Data lines are identified by the speed marker; everything else is
    // instrument header/footer noise
    if !tokens.iter().any(|&t| t == SPEED_UNIT) {
        return Ok(None);
    }

    let speed = value_before_unit(&tokens, SPEED_UNIT, line_no)?;
    let viscosity_code = value_before_unit(&tokens, VISCOSITY_UNIT, line_no)?;
    let torque_pct = value_before_unit(&tokens, TORQUE_UNIT, line_no)?;

    if speed < 0.0 || speed.fract() != 0.0 {
        return Err(TrialError::MalformedRecord {
            line: line_no,
            reason: format!("speed '{}' is not a whole non-negative rpm value", speed),
        });
    }

    Ok(Some(RawSample {
        speed_rpm: speed as u32,
        torque_pct,
        viscosity_code,
    }))
}

/// Extract the numeric token immediately preceding a unit marker
fn value_before_unit(tokens: &[&str], unit: &str, line_no: usize) -> Result<f64, TrialError> {
    let unit_pos = tokens.iter().position(|&t| t == unit).ok_or_else(|| {
        TrialError::MalformedRecord {
            line: line_no,
            reason: format!("missing '{}' field", unit),
        }
    })?;

    if unit_pos == 0 {
        return Err(TrialError::MalformedRecord {
            line: line_no,
            reason: format!("no value before '{}' marker", unit),
        });
    }

    tokens[unit_pos - 1]
        .parse::<f64>()
        .map_err(|_| TrialError::MalformedRecord {
            line: line_no,
            reason: format!(
                "value '{}' before '{}' is not a number",
                tokens[unit_pos - 1],
                unit
            ),
        })
}
