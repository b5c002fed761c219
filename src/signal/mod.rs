//! Signal metrics engine.
//!
//! Pure, single-threaded algorithms that turn one decoded recording into the
//! five Fisher-score inputs and a grade. Metrics are derived in a fixed order:
//! basal rhythm and amplitude first, then variability (needs the basal
//! window), then accelerations and decelerations (need the basal rhythm).

pub mod basal;
pub mod events;
pub mod scoring;
pub mod types;
pub mod variability;

pub use basal::basal_window;
pub use events::{Excursion, count_events};
pub use scoring::FisherScore;
pub use types::{Grade, Metrics, Recording, Sample, WindowResult};
pub use variability::variability;

use crate::defaults;
use crate::error::{CtgError, Result};
use serde::{Deserialize, Serialize};

/// What to do with a window or run still open at the last sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingRun {
    /// Evaluate it like any window closed by an out-of-band sample.
    #[default]
    Close,
    /// Never evaluate it; only windows closed by a later sample count.
    Discard,
}

/// Thresholds for the metrics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub basal_tolerance: f64,
    pub variability_window: usize,
    pub event_threshold: f64,
    pub min_event_length: usize,
    pub trailing_run: TrailingRun,
    /// Drop readings outside `[artifact_min, artifact_max]` before analysis.
    pub drop_artifacts: bool,
    pub artifact_min: f64,
    pub artifact_max: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            basal_tolerance: defaults::BASAL_TOLERANCE,
            variability_window: defaults::VARIABILITY_WINDOW,
            event_threshold: defaults::EVENT_THRESHOLD,
            min_event_length: defaults::MIN_EVENT_LENGTH,
            trailing_run: TrailingRun::default(),
            drop_artifacts: false,
            artifact_min: defaults::ARTIFACT_MIN,
            artifact_max: defaults::ARTIFACT_MAX,
        }
    }
}

impl AnalysisConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.basal_tolerance > 0.0) {
            return Err(CtgError::ConfigInvalidValue {
                key: "analysis.basal_tolerance".to_string(),
                message: format!("must be positive, got {}", self.basal_tolerance),
            });
        }
        if self.drop_artifacts && self.artifact_min >= self.artifact_max {
            return Err(CtgError::ConfigInvalidValue {
                key: "analysis.artifact_min".to_string(),
                message: format!(
                    "must be below artifact_max ({} >= {})",
                    self.artifact_min, self.artifact_max
                ),
            });
        }
        Ok(())
    }
}

/// Everything derived from one recording.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Analysis {
    pub window: WindowResult,
    pub metrics: Metrics,
    pub score: FisherScore,
    pub grade: Grade,
}

/// Fisher-score analyzer. Holds only configuration, so repeated calls on the
/// same recording return identical results.
#[derive(Debug, Clone, Default)]
pub struct FisherAnalyzer {
    config: AnalysisConfig,
}

impl FisherAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn analyze(&self, recording: &Recording) -> Analysis {
        let cleaned;
        let recording = if self.config.drop_artifacts {
            cleaned =
                recording.without_artifacts(self.config.artifact_min, self.config.artifact_max);
            &cleaned
        } else {
            recording
        };

        let cfg = &self.config;
        let values = recording.values();

        let window = basal_window(&values, cfg.basal_tolerance, cfg.trailing_run);
        let basal_rhythm = window.mean;
        let amplitude = window.amplitude;
        let variability = variability(&values, &window, cfg.variability_window);
        let accelerations = count_events(
            recording.samples(),
            Excursion::accelerations(basal_rhythm, cfg.event_threshold),
            cfg.min_event_length,
            cfg.trailing_run,
        );
        let decelerations = count_events(
            recording.samples(),
            Excursion::decelerations(basal_rhythm, cfg.event_threshold),
            cfg.min_event_length,
            cfg.trailing_run,
        );

        let metrics = Metrics {
            basal_rhythm,
            amplitude,
            variability,
            accelerations,
            decelerations,
        };
        let score = FisherScore::from_metrics(&metrics);

        Analysis {
            window,
            metrics,
            score,
            grade: score.grade(),
        }
    }

    pub fn grade(&self, recording: &Recording) -> Grade {
        self.analyze(recording).grade
    }
}
