// Filename metadata extraction - declarative field schema over the stem
//
// Trial files are named with an underscore-delimited stem:
//
//   <tempC>_<date>_<fluid>_<trial>[_s<spindle>].txt
//
// e.g. 25C_2026-08-12_glycerol_3_s40.txt
//
// Fields are extracted by name against this schema; a stem that does not
// match is a reportable MalformedFilename error naming the offending
// field, never undefined positional slicing.

use crate::error::TrialError;
use crate::trial::TrialMetadata;

/// Spindle used when the optional spindle segment is absent
const DEFAULT_SPINDLE_CODE: u32 = 40;

/// Field names of the documented stem schema, in order
const STEM_FIELDS: [&str; 4] = ["temperature", "date", "fluid", "trial number"];

/// Extract trial metadata from a file name
///
/// Strips the extension and applies the stem schema.
///
/// # Arguments
/// * `name` - File name, with or without directory components stripped
pub fn parse_file_name(name: &str) -> Result<TrialMetadata, TrialError> {
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    parse_stem(stem, name)
}

fn malformed(stem: &str, reason: String) -> TrialError {
    TrialError::MalformedFilename {
        stem: stem.to_string(),
        reason,
    }
}

/// Extract trial metadata from a file name stem
fn parse_stem(stem: &str, source_name: &str) -> Result<TrialMetadata, TrialError> {
    let segments: Vec<&str> = stem.split('_').collect();

    if segments.len() < STEM_FIELDS.len() || segments.len() > STEM_FIELDS.len() + 1 {
        return Err(malformed(
            stem,
            format!(
                "expected {} fields ({}) plus optional spindle, found {}",
                STEM_FIELDS.len(),
                STEM_FIELDS.join(", "),
                segments.len()
            ),
        ));
    }

    let temperature_c = parse_temperature(segments[0]).ok_or_else(|| {
        malformed(
            stem,
            format!("temperature field '{}' is not like '25C'", segments[0]),
        )
    })?;

    let date = segments[1];
    if date.is_empty() {
        return Err(malformed(stem, "date field is empty".to_string()));
    }

    let fluid = segments[2];
    if fluid.is_empty() {
        return Err(malformed(stem, "fluid field is empty".to_string()));
    }

    let trial_number: u32 = segments[3].parse().map_err(|_| {
        malformed(
            stem,
            format!("trial number field '{}' is not an integer", segments[3]),
        )
    })?;

    let spindle_code = match segments.get(4) {
        Some(segment) => parse_spindle(segment).ok_or_else(|| {
            malformed(
                stem,
                format!("spindle field '{}' is not like 's40'", segment),
            )
        })?,
        None => DEFAULT_SPINDLE_CODE,
    };

    Ok(TrialMetadata {
        temperature_c,
        date: date.to_string(),
        fluid: fluid.to_string(),
        trial_number,
        spindle_code,
        source_name: source_name.to_string(),
    })
}

/// Temperature field: digits with a trailing C, e.g. "25C" or "37.5C"
fn parse_temperature(segment: &str) -> Option<f64> {
    let digits = segment.strip_suffix(['C', 'c'])?;
    digits.parse().ok()
}

/// Spindle field: instrument code with a leading s, e.g. "s40"
fn parse_spindle(segment: &str) -> Option<u32> {
    let digits = segment.strip_prefix(['s', 'S'])?;
    digits.parse().ok()
}
