//! Batch report persistence.
//!
//! Writes the batch outcome as an aggregate JSON file (trial summaries
//! plus skipped-trial records) and optionally as a CSV table for
//! spreadsheet import. Non-finite statistics become JSON `null` and empty
//! CSV cells; the `steady_region_found` flag keeps a trial with no steady
//! region visible instead of silently reading as zero viscosity.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::analysis::{BatchOutcome, FailureRecord};
use crate::trial::TrialSummary;

/// Aggregate JSON payload for one batch run
#[derive(Serialize)]
pub struct BatchReportPayload<'a> {
    pub trial_count: usize,
    pub failure_count: usize,
    pub trials: &'a [TrialSummary],
    pub failures: Vec<FailureRecord>,
}

impl<'a> BatchReportPayload<'a> {
    pub fn new(outcome: &'a BatchOutcome) -> Self {
        Self {
            trial_count: outcome.summaries.len(),
            failure_count: outcome.failures.len(),
            trials: &outcome.summaries,
            failures: outcome.failures.iter().map(|f| f.to_record()).collect(),
        }
    }
}

/// Render the aggregate report as pretty JSON
///
/// serde_json writes non-finite floats as `null`, which is exactly the
/// "visible, never zero" contract for empty steady regions.
pub fn render_json(outcome: &BatchOutcome) -> Result<String> {
    let payload = BatchReportPayload::new(outcome);
    serde_json::to_string_pretty(&payload).context("serializing batch report")
}

/// Write the aggregate JSON report to disk
pub fn write_json_report<P: AsRef<Path>>(path: P, outcome: &BatchOutcome) -> Result<()> {
    let json = render_json(outcome)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.as_ref().display()))?;
    Ok(())
}

/// CSV column header, kept in sync with `csv_row`
const CSV_HEADER: &str = "source,fluid,temperature_c,date,trial,spindle,nominal_speed_rpm,\
samples,steady_samples,mean_mpas,stdev_mpas,lower_95,upper_95,steady_region_found,\
window_size,threshold";

/// Write the summaries as a CSV table for spreadsheet import
pub fn write_csv_report<P: AsRef<Path>>(path: P, summaries: &[TrialSummary]) -> Result<()> {
    let mut out = String::new();
    out.push_str(CSV_HEADER);
    out.push('\n');

    for summary in summaries {
        csv_row(&mut out, summary);
    }

    fs::write(&path, out).with_context(|| format!("writing {}", path.as_ref().display()))?;
    Ok(())
}

fn csv_row(out: &mut String, s: &TrialSummary) {
    // Writing to a String cannot fail; unwrap via expect is not needed
    let _ = writeln!(
        out,
        "{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{}",
        s.metadata.source_name,
        s.metadata.fluid,
        s.metadata.temperature_c,
        s.metadata.date,
        s.metadata.trial_number,
        s.spindle.code(),
        s.nominal_speed_rpm,
        s.sample_count,
        s.steady_sample_count,
        csv_cell(s.stats.mean),
        csv_cell(s.stats.stdev),
        csv_cell(s.stats.lower_bound),
        csv_cell(s.stats.upper_bound),
        s.steady_region_found,
        s.window_size,
        s.threshold,
    );
}

/// Format a statistic cell; non-finite values become an empty cell
fn csv_cell(value: f64) -> String {
    if value.is_finite() {
        value.to_string()
    } else {
        String::new()
    }
}
