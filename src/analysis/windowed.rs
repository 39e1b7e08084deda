// WindowedStdevEngine - moving-window standard deviation over a trial
//
// This module computes the windowed statistic that drives steady-region
// segmentation. For every position where a full window of `window_size`
// samples exists, it records the sample standard deviation of that window
// against the window's center index in the original sequence.
//
// Algorithm:
// 1. radius = window_size / 2 (integer division; even windows stay
//    asymmetric about their nominal center - do not symmetrize)
// 2. For k in 0..len - 2*radius: stdev(seq[k..k+window_size]),
//    center = k + radius. Every window is fully covered; for even window
//    sizes the last full-window position is intentionally not visited,
//    keeping the len - 2*radius output count for every window size
// 3. Drop any NaN value together with its center in the same pass so the
//    two output sequences stay index-aligned

use crate::analysis::summary::sample_stdev;

/// Aligned (center index, value) pairs from a moving-window statistic
///
/// `centers[i]` is an index into the original sequence the statistic was
/// computed over; `values[i]` is the sample standard deviation of the
/// window centered (radius rounding down) at that index.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowedStatistic {
    pub centers: Vec<usize>,
    pub values: Vec<f64>,
}

impl WindowedStatistic {
    /// Number of fully-evaluated window positions that survived filtering
    pub fn len(&self) -> usize {
        self.centers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty()
    }
}

/// Offset from a window's center to its edge
pub fn window_radius(window_size: usize) -> usize {
    window_size / 2
}

/// Compute the moving-window sample standard deviation of a sequence
///
/// Produces exactly `len(seq) - 2 * radius` entries before NaN filtering,
/// for every window size; if `len(seq) < window_size` there are no valid
/// windows and the result is empty.
///
/// # Arguments
/// * `seq` - Ordered measurement sequence (index order = time order)
/// * `window_size` - Window length in samples, must be positive
///
/// # Returns
/// Aligned centers and standard deviation values
pub fn compute_windowed_stdev(seq: &[f64], window_size: usize) -> WindowedStatistic {
    let radius = window_radius(window_size);

    if window_size == 0 || seq.len() < window_size {
        return WindowedStatistic {
            centers: Vec::new(),
            values: Vec::new(),
        };
    }

    let positions = seq.len() - 2 * radius;
    let mut centers = Vec::with_capacity(positions);
    let mut values = Vec::with_capacity(positions);

    for k in 0..positions {
        let stdev = sample_stdev(&seq[k..k + window_size]);

        // Undefined windows are dropped with their center in the same
        // pass, keeping the two vectors aligned
        if stdev.is_nan() {
            continue;
        }

        centers.push(k + radius);
        values.push(stdev);
    }

    WindowedStatistic { centers, values }
}
