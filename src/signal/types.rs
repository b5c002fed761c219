//! Data types for the signal metrics engine.

use crate::error::CtgError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One heart-rate reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Ordinal position in file order. Survives artifact removal, so gaps mark dropped samples.
    pub index: usize,
    /// Position reported by the file (`Key`), used for plotting.
    pub x: f64,
    /// Heart-rate reading (`Value`), beats per minute.
    pub value: f64,
}

/// A decoded recording: samples in temporal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recording {
    samples: Vec<Sample>,
}

impl Recording {
    /// Creates a recording from already indexed samples.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Creates a densely indexed recording from `(x, value)` points.
    pub fn from_points(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let samples = points
            .into_iter()
            .enumerate()
            .map(|(index, (x, value))| Sample { index, x, value })
            .collect();
        Self { samples }
    }

    /// Creates a densely indexed recording where `x` equals the index.
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        Self::from_points(
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (index as f64, value)),
        )
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn values(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.value).collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Drops readings outside `[min, max]`, keeping the original indices.
    pub fn without_artifacts(&self, min: f64, max: f64) -> Recording {
        Recording {
            samples: self
                .samples
                .iter()
                .filter(|s| (min..=max).contains(&s.value))
                .copied()
                .collect(),
        }
    }
}

/// The basal window: longest contiguous run whose value range stays under the tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct WindowResult {
    /// Position of the first sample, inclusive.
    pub start: usize,
    /// Position of the last sample, inclusive.
    pub end: usize,
    /// Number of samples in the window. Zero when no window was found.
    pub length: usize,
    pub mean: f64,
    /// `max - min` over the window.
    pub amplitude: f64,
}

/// Fisher-score inputs for one recording.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub basal_rhythm: f64,
    pub amplitude: f64,
    pub variability: usize,
    pub accelerations: usize,
    pub decelerations: usize,
}

/// Clinical classification of a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(alias = "good", alias = "хорошее")]
    Good,
    #[serde(alias = "poor", alias = "плохое")]
    Poor,
}

impl Grade {
    /// Label used by the reference result files.
    pub fn reference_label(self) -> &'static str {
        match self {
            Grade::Good => "хорошее",
            Grade::Poor => "плохое",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grade::Good => write!(f, "Good"),
            Grade::Poor => write!(f, "Poor"),
        }
    }
}

impl FromStr for Grade {
    type Err = CtgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Good" | "good" | "хорошее" => Ok(Grade::Good),
            "Poor" | "poor" | "плохое" => Ok(Grade::Poor),
            other => Err(CtgError::UnknownGrade {
                label: other.to_string(),
            }),
        }
    }
}
