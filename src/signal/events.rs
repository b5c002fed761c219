//! Acceleration and deceleration run detection.

use crate::signal::TrailingRun;
use crate::signal::types::Sample;

/// Which side of the basal band a sample must fall on to be flagged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Excursion {
    /// Flag samples strictly above the bound (accelerations).
    Above(f64),
    /// Flag samples strictly below the bound (decelerations).
    Below(f64),
}

impl Excursion {
    pub fn accelerations(basal_rhythm: f64, threshold: f64) -> Self {
        Excursion::Above(basal_rhythm + threshold)
    }

    pub fn decelerations(basal_rhythm: f64, threshold: f64) -> Self {
        Excursion::Below(basal_rhythm - threshold)
    }

    fn flags(self, value: f64) -> bool {
        match self {
            Excursion::Above(bound) => value > bound,
            Excursion::Below(bound) => value < bound,
        }
    }
}

/// Run of flagged samples with strictly consecutive indices.
struct Run {
    last_index: usize,
    length: usize,
}

impl Run {
    fn counts(&self, min_length: usize) -> bool {
        self.length > min_length
    }
}

/// Counts runs of flagged samples longer than `min_length`.
///
/// A run ends at the first non-flagged sample or at a gap in sample indices.
/// A run still open after the last sample is counted only under
/// [`TrailingRun::Close`].
pub fn count_events(
    samples: &[Sample],
    excursion: Excursion,
    min_length: usize,
    trailing: TrailingRun,
) -> usize {
    let mut count = 0;
    let mut run: Option<Run> = None;

    for sample in samples {
        if !excursion.flags(sample.value) {
            if run.take().is_some_and(|r| r.counts(min_length)) {
                count += 1;
            }
            continue;
        }

        if let Some(r) = run.as_mut()
            && sample.index == r.last_index + 1
        {
            r.last_index = sample.index;
            r.length += 1;
            continue;
        }

        // Index gap or fresh excursion.
        if run.take().is_some_and(|r| r.counts(min_length)) {
            count += 1;
        }
        run = Some(Run {
            last_index: sample.index,
            length: 1,
        });
    }

    if trailing == TrailingRun::Close && run.is_some_and(|r| r.counts(min_length)) {
        count += 1;
    }

    count
}
