// SteadinessClassifier - threshold rule over the windowed statistic
//
// A window position counts as steady when its standard deviation is
// strictly below the configured threshold. Equal-to-threshold is NOT
// steady; the boundary belongs to the unsteady side.

use crate::analysis::windowed::WindowedStatistic;

/// Select the center indices classified as steady
///
/// Preserves the relative order of `stat.centers`. The returned indices
/// refer to positions in the *original* calibrated sequence, not the
/// windowed one.
///
/// # Arguments
/// * `stat` - Aligned windowed standard deviation
/// * `threshold` - Steadiness threshold, same units as the statistic
pub fn steady_centers(stat: &WindowedStatistic, threshold: f64) -> Vec<usize> {
    stat.centers
        .iter()
        .zip(stat.values.iter())
        .filter(|(_, &value)| value < threshold)
        .map(|(&center, _)| center)
        .collect()
}

/// Select samples from the original sequence by center index
///
/// Center indices out of range cannot occur for a statistic computed over
/// `seq` itself; they are skipped rather than panicking if a caller pairs
/// mismatched inputs.
pub fn select_samples(seq: &[f64], centers: &[usize]) -> Vec<f64> {
    centers
        .iter()
        .filter_map(|&center| seq.get(center).copied())
        .collect()
}
