//! Basal rhythm and amplitude detection.
//!
//! Scans the values once, growing a window while its range stays under the
//! tolerance. An out-of-band sample closes the window and starts a new one at
//! that sample; the longest closed window is the basal segment.

use crate::signal::TrailingRun;
use crate::signal::types::WindowResult;

/// Window currently being grown by the scan.
struct OpenWindow {
    start: usize,
    end: usize,
    min: f64,
    max: f64,
    sum: f64,
    length: usize,
}

impl OpenWindow {
    fn start(position: usize, value: f64) -> Self {
        Self {
            start: position,
            end: position,
            min: value,
            max: value,
            sum: value,
            length: 1,
        }
    }

    /// Accepts the sample if the range stays under `tolerance`.
    fn try_extend(&mut self, position: usize, value: f64, tolerance: f64) -> bool {
        let min = self.min.min(value);
        let max = self.max.max(value);
        if max - min >= tolerance {
            return false;
        }
        self.min = min;
        self.max = max;
        self.sum += value;
        self.length += 1;
        self.end = position;
        true
    }

    /// Replaces `best` when this window is strictly longer.
    fn close_into(&self, best: &mut WindowResult) {
        if self.length > best.length {
            *best = WindowResult {
                start: self.start,
                end: self.end,
                length: self.length,
                mean: self.sum / self.length as f64,
                amplitude: self.max - self.min,
            };
        }
    }
}

/// Finds the basal window of `values`.
///
/// Positions in the result index into `values`. Ties keep the earliest window.
/// Returns an all-zero result for an empty input, or under
/// [`TrailingRun::Discard`] when no window was ever closed.
pub fn basal_window(values: &[f64], tolerance: f64, trailing: TrailingRun) -> WindowResult {
    let mut best = WindowResult::default();
    let Some(&first) = values.first() else {
        return best;
    };

    let mut window = OpenWindow::start(0, first);
    for (position, &value) in values.iter().enumerate().skip(1) {
        if !window.try_extend(position, value, tolerance) {
            window.close_into(&mut best);
            window = OpenWindow::start(position, value);
        }
    }

    if trailing == TrailingRun::Close {
        window.close_into(&mut best);
    }

    best
}
