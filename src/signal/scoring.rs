//! Fisher scoring table.

use crate::defaults;
use crate::signal::types::{Grade, Metrics};
use serde::Serialize;

/// Per-criterion Fisher points, each in `0..=2`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FisherScore {
    pub basal_rhythm: u8,
    pub amplitude: u8,
    pub variability: u8,
    pub accelerations: u8,
    pub decelerations: u8,
}

impl FisherScore {
    pub fn from_metrics(metrics: &Metrics) -> Self {
        Self {
            basal_rhythm: basal_rhythm_points(metrics.basal_rhythm),
            amplitude: amplitude_points(metrics.amplitude),
            variability: variability_points(metrics.variability),
            accelerations: acceleration_points(metrics.accelerations),
            decelerations: deceleration_points(metrics.decelerations),
        }
    }

    /// Sum of all criteria, `0..=10`.
    pub fn total(&self) -> u8 {
        self.basal_rhythm
            + self.amplitude
            + self.variability
            + self.accelerations
            + self.decelerations
    }

    pub fn grade(&self) -> Grade {
        if self.total() < defaults::GOOD_SCORE_THRESHOLD {
            Grade::Poor
        } else {
            Grade::Good
        }
    }
}

fn basal_rhythm_points(bpm: f64) -> u8 {
    if (120.0..=160.0).contains(&bpm) {
        2
    } else if (100.0..=180.0).contains(&bpm) {
        1
    } else {
        0
    }
}

fn amplitude_points(amplitude: f64) -> u8 {
    if (6.0..=25.0).contains(&amplitude) {
        2
    } else if (3.0..=5.0).contains(&amplitude) {
        1
    } else {
        0
    }
}

fn variability_points(oscillations: usize) -> u8 {
    match oscillations {
        7.. => 2,
        3..=6 => 1,
        _ => 0,
    }
}

fn acceleration_points(count: usize) -> u8 {
    match count {
        0 => 0,
        1..=5 => 1,
        _ => 2,
    }
}

fn deceleration_points(count: usize) -> u8 {
    match count {
        0 => 2,
        1 => 1,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(basal: f64, amplitude: f64, var: usize, acc: usize, dec: usize) -> Metrics {
        Metrics {
            basal_rhythm: basal,
            amplitude,
            variability: var,
            accelerations: acc,
            decelerations: dec,
        }
    }

    #[test]
    fn test_basal_rhythm_bands() {
        assert_eq!(basal_rhythm_points(120.0), 2);
        assert_eq!(basal_rhythm_points(160.0), 2);
        assert_eq!(basal_rhythm_points(119.9), 1);
        assert_eq!(basal_rhythm_points(100.0), 1);
        assert_eq!(basal_rhythm_points(180.0), 1);
        assert_eq!(basal_rhythm_points(99.0), 0);
        assert_eq!(basal_rhythm_points(181.0), 0);
    }

    #[test]
    fn test_amplitude_bands() {
        assert_eq!(amplitude_points(6.0), 2);
        assert_eq!(amplitude_points(25.0), 2);
        assert_eq!(amplitude_points(3.0), 1);
        assert_eq!(amplitude_points(5.0), 1);
        assert_eq!(amplitude_points(5.5), 0, "gap between bands scores nothing");
        assert_eq!(amplitude_points(0.0), 0);
        assert_eq!(amplitude_points(30.0), 0);
    }

    #[test]
    fn test_count_bands() {
        assert_eq!(variability_points(7), 2);
        assert_eq!(variability_points(6), 1);
        assert_eq!(variability_points(3), 1);
        assert_eq!(variability_points(2), 0);

        assert_eq!(acceleration_points(6), 2);
        assert_eq!(acceleration_points(5), 1);
        assert_eq!(acceleration_points(1), 1);
        assert_eq!(acceleration_points(0), 0);

        assert_eq!(deceleration_points(0), 2);
        assert_eq!(deceleration_points(1), 1);
        assert_eq!(deceleration_points(2), 0);
    }

    #[test]
    fn test_total_of_eight_is_good() {
        let score = FisherScore::from_metrics(&metrics(140.0, 10.0, 178, 0, 0));
        assert_eq!(score.total(), 8);
        assert_eq!(score.grade(), Grade::Good);
    }

    #[test]
    fn test_total_of_seven_is_poor() {
        let score = FisherScore::from_metrics(&metrics(140.0, 10.0, 5, 0, 0));
        assert_eq!(score.total(), 7);
        assert_eq!(score.grade(), Grade::Poor);
    }

    #[test]
    fn test_perfect_score() {
        let score = FisherScore::from_metrics(&metrics(135.0, 12.0, 20, 6, 0));
        assert_eq!(score.total(), 10);
        assert_eq!(score.grade(), Grade::Good);
    }

    #[test]
    fn test_flat_signal_is_poor() {
        let score = FisherScore::from_metrics(&metrics(140.0, 0.0, 0, 0, 0));
        assert_eq!(score.amplitude, 0);
        assert!(score.total() <= 6);
        assert_eq!(score.grade(), Grade::Poor);
    }
}
