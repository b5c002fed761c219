//! Station that grades each recording with the Fisher analyzer.

use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::{DecodedRecording, GradedFile};
use crate::signal::FisherAnalyzer;

#[derive(Debug, Clone, Default)]
pub struct ScoringStation {
    analyzer: FisherAnalyzer,
}

impl ScoringStation {
    pub fn new(analyzer: FisherAnalyzer) -> Self {
        Self { analyzer }
    }
}

impl Station for ScoringStation {
    type Output = GradedFile;

    fn process(&mut self, input: DecodedRecording) -> Result<Option<GradedFile>, StationError> {
        let analysis = self.analyzer.analyze(&input.recording);
        let m = &analysis.metrics;
        tracing::debug!(
            file = %input.filename,
            basal_rhythm = m.basal_rhythm,
            amplitude = m.amplitude,
            variability = m.variability,
            accelerations = m.accelerations,
            decelerations = m.decelerations,
            score = analysis.score.total(),
            grade = %analysis.grade,
            "recording graded"
        );

        Ok(Some(GradedFile {
            filename: input.filename,
            grade: analysis.grade,
        }))
    }

    fn name(&self) -> &'static str {
        "analyzer"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{Grade, Recording};

    #[test]
    fn test_grades_recording_under_its_filename() {
        let mut station = ScoringStation::default();
        let values = (0..200).map(|i| if i % 2 == 0 { 135.0 } else { 145.0 });
        let input = DecodedRecording::new("7.txt", Recording::from_values(values));

        let output = station.process(input).unwrap().unwrap();
        assert_eq!(
            output,
            GradedFile {
                filename: "7.txt".to_string(),
                grade: Grade::Good,
            }
        );
    }

    #[test]
    fn test_flat_recording_graded_poor() {
        let mut station = ScoringStation::default();
        let input = DecodedRecording::new("flat.txt", Recording::from_values(vec![140.0; 200]));
        assert_eq!(station.process(input).unwrap().unwrap().grade, Grade::Poor);
    }
}
