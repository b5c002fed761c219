//! Short-term variability: oscillation count inside the basal window.

use crate::signal::types::WindowResult;

/// Counts strict local extrema in the first `max_len` values of `window`.
///
/// Adjacent equal values are collapsed before counting, so a plateau at a
/// peak counts once. The first and last points of the reduced sequence are
/// never extrema.
pub fn variability(values: &[f64], window: &WindowResult, max_len: usize) -> usize {
    if window.length == 0 || window.start >= values.len() {
        return 0;
    }

    let end = (window.end + 1).min(values.len());
    let segment = &values[window.start..end];
    let segment = &segment[..segment.len().min(max_len)];

    let mut reduced: Vec<f64> = Vec::with_capacity(segment.len());
    for &value in segment {
        if reduced.last() != Some(&value) {
            reduced.push(value);
        }
    }

    reduced
        .windows(3)
        .filter(|w| (w[1] > w[0] && w[1] > w[2]) || (w[1] < w[0] && w[1] < w[2]))
        .count()
}
