//! Messages exchanged between pipeline stages.

use crate::signal::{Grade, Recording};
use std::collections::HashMap;

/// Final output of a scoring run: file name to grade.
pub type ResultMap = HashMap<String, Grade>;

/// A recording together with the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedRecording {
    /// File name relative to the input directory.
    pub filename: String,
    pub recording: Recording,
}

impl DecodedRecording {
    pub fn new(filename: impl Into<String>, recording: Recording) -> Self {
        Self {
            filename: filename.into(),
            recording,
        }
    }
}

/// Work-queue message. A run enqueues exactly one `EndOfFiles`.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedMessage {
    Data(DecodedRecording),
    EndOfFiles,
}

/// Message from a worker back to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerEvent<T> {
    /// A station produced output for one file.
    Output(T),
    /// The worker has stopped. Sent exactly once per worker.
    Finished { worker: usize },
}

/// Output of the scoring station.
#[derive(Debug, Clone, PartialEq)]
pub struct GradedFile {
    pub filename: String,
    pub grade: Grade,
}
