// Summary statistics over the steady subset of a trial
//
// Mean, sample standard deviation, and a fixed-z two-sided 95% interval on
// the raw included samples (mean ± 1.96 * stdev, NOT the standard error of
// the mean). An empty subset yields NaN throughout: "no steady region
// found" must stay visible and is never coerced to 0.

use serde::{Deserialize, Serialize};

/// z-value for a two-sided 95% normal-approximation interval
const Z_95: f64 = 1.96;

/// Confidence-bounded summary of the steady subset
///
/// All four fields are NaN when the subset is empty; `stdev` and the
/// bounds are also NaN for a single-sample subset (n-1 denominator).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Arithmetic mean of the included samples, mPa·s
    pub mean: f64,
    /// Sample standard deviation (n-1 denominator), mPa·s
    pub stdev: f64,
    /// mean - 1.96 * stdev
    pub lower_bound: f64,
    /// mean + 1.96 * stdev
    pub upper_bound: f64,
}

/// Arithmetic mean; NaN for an empty slice
pub fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return f64::NAN;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Sample standard deviation with n-1 denominator; NaN for n < 2
pub fn sample_stdev(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return f64::NAN;
    }

    let m = mean(samples);
    let sum_sq: f64 = samples.iter().map(|&v| (v - m) * (v - m)).sum();
    (sum_sq / (n - 1) as f64).sqrt()
}

/// Summarize the included (steady) subset of a calibrated sequence
pub fn summarize(samples: &[f64]) -> SummaryStats {
    let mean = mean(samples);
    let stdev = sample_stdev(samples);

    SummaryStats {
        mean,
        stdev,
        lower_bound: mean - Z_95 * stdev,
        upper_bound: mean + Z_95 * stdev,
    }
}
