//! Station that renders each recording to an image.

use crate::pipeline::error::StationError;
use crate::pipeline::station::Station;
use crate::pipeline::types::DecodedRecording;
use crate::plot::Visualizer;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
pub struct PlotStation {
    visualizer: Arc<dyn Visualizer>,
}

impl PlotStation {
    pub fn new(visualizer: Arc<dyn Visualizer>) -> Self {
        Self { visualizer }
    }
}

impl Station for PlotStation {
    type Output = PathBuf;

    fn process(&mut self, input: DecodedRecording) -> Result<Option<PathBuf>, StationError> {
        self.visualizer
            .render(&input.filename, &input.recording)
            .map(Some)
            .map_err(|e| StationError::Recoverable(format!("{}: {}", input.filename, e)))
    }

    fn name(&self) -> &'static str {
        "plotter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CtgError, Result};
    use crate::signal::Recording;

    struct NamingVisualizer;

    impl Visualizer for NamingVisualizer {
        fn render(&self, name: &str, recording: &Recording) -> Result<PathBuf> {
            if recording.is_empty() {
                return Err(CtgError::Plot {
                    message: "nothing to draw".to_string(),
                });
            }
            Ok(PathBuf::from(crate::plot::image_name(name)))
        }
    }

    #[test]
    fn test_returns_rendered_path() {
        let mut station = PlotStation::new(Arc::new(NamingVisualizer));
        let input = DecodedRecording::new("3.txt", Recording::from_values([140.0]));
        assert_eq!(
            station.process(input).unwrap(),
            Some(PathBuf::from("3.png"))
        );
    }

    #[test]
    fn test_render_failure_is_recoverable() {
        let mut station = PlotStation::new(Arc::new(NamingVisualizer));
        let input = DecodedRecording::new("3.txt", Recording::default());
        match station.process(input) {
            Err(StationError::Recoverable(msg)) => assert!(msg.starts_with("3.txt")),
            other => panic!("expected recoverable error, got {:?}", other),
        }
    }
}
