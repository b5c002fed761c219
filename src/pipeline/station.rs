//! Core station abstraction for the analysis stage.

use crate::pipeline::error::StationError;
use crate::pipeline::types::DecodedRecording;

/// Per-file processing step run by every analysis worker.
///
/// Each worker owns its own clone of the station, so implementations may keep
/// mutable state without synchronization.
pub trait Station: Send + 'static {
    /// The output type this station produces.
    type Output: Send + 'static;

    /// Processes one decoded recording.
    ///
    /// Returns:
    /// - `Ok(Some(output))` - Successfully processed and produced output
    /// - `Ok(None)` - Successfully processed but nothing to report
    /// - `Err(StationError)` - Processing failed
    fn process(&mut self, input: DecodedRecording) -> Result<Option<Self::Output>, StationError>;

    /// Returns the name of this station for logging and error reporting.
    fn name(&self) -> &'static str;

    /// Called once when the worker stops.
    fn shutdown(&mut self) {}
}
