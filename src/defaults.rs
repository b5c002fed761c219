//! Default configuration constants for ctgscore.
//!
//! Shared by the configuration layer, the signal engine and the pipeline so
//! that the clinical thresholds live in exactly one place.

/// Default input directory holding one recording per file.
pub const INPUT_DIR: &str = "./ctg_files";

/// Default worker count, applied to both the reader and the analyzer stage.
pub const PROCESSES: usize = 8;

/// Default bounded wait for one queue poll, in milliseconds.
///
/// The timeout only exists so idle workers re-check the completion signal.
pub const POLL_INTERVAL_MS: u64 = 1000;

/// Maximum value range (exclusive) of a window still considered basal.
pub const BASAL_TOLERANCE: f64 = 25.0;

/// Number of samples from the start of the basal window used for variability.
pub const VARIABILITY_WINDOW: usize = 180;

/// Distance from the basal rhythm that flags a sample as an excursion.
pub const EVENT_THRESHOLD: f64 = 20.0;

/// A flagged run must be longer than this many samples to count as an event.
pub const MIN_EVENT_LENGTH: usize = 30;

/// Fisher-score total below which a recording is graded poor.
pub const GOOD_SCORE_THRESHOLD: u8 = 8;

/// Lower bound of plausible readings when artifact removal is enabled.
pub const ARTIFACT_MIN: f64 = 80.0;

/// Upper bound of plausible readings when artifact removal is enabled.
pub const ARTIFACT_MAX: f64 = 180.0;

/// Default reference mapping used by the comparison step.
pub const EXPECTED_RESULT_FILE: &str = "expected_result.json";

/// Default comparison report path.
pub const REPORT_FILE: &str = "comparison.json";

/// Default plot output directory. Cleared before every plotting run.
pub const GRAPHS_DIR: &str = "./graphs";

/// Default log file, written in addition to stderr.
pub const LOG_FILE: &str = "ctg.log";

/// Fixed plot axes: x covers `0..=PLOT_X_MAX`, y covers `PLOT_Y_MIN..=PLOT_Y_MAX`.
pub const PLOT_X_MAX: f64 = 2500.0;
pub const PLOT_Y_MIN: f64 = 50.0;
pub const PLOT_Y_MAX: f64 = 200.0;

/// Spacing of vertical grid lines, in x units.
pub const PLOT_X_TICK: f64 = 30.0;

/// Spacing of horizontal grid lines, in y units.
pub const PLOT_Y_TICK: f64 = 10.0;

/// Plot canvas size in pixels.
pub const PLOT_WIDTH: u32 = 5000;
pub const PLOT_HEIGHT: u32 = 500;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_artifact_bounds_are_ordered() {
        assert!(ARTIFACT_MIN < ARTIFACT_MAX);
    }

    #[test]
    fn test_plot_axes_cover_clinical_range() {
        assert!(PLOT_Y_MIN <= ARTIFACT_MIN);
        assert!(PLOT_Y_MAX >= ARTIFACT_MAX);
        assert!(PLOT_X_TICK < PLOT_X_MAX);
    }
}
