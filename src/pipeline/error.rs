//! Error types and reporting for pipeline stations.

use std::fmt;
use std::sync::Mutex;

/// Errors that can occur while a station handles one file.
#[derive(Debug, Clone, PartialEq)]
pub enum StationError {
    /// Recoverable error: the file is skipped and the station keeps going.
    Recoverable(String),
    /// Fatal error: the station shuts down.
    Fatal(String),
}

impl fmt::Display for StationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StationError::Recoverable(msg) => write!(f, "Recoverable error: {}", msg),
            StationError::Fatal(msg) => write!(f, "Fatal error: {}", msg),
        }
    }
}

impl std::error::Error for StationError {}

/// Logging handle shared by readers and workers.
///
/// Constructed once by the caller and handed to the pipeline, which clones the
/// `Arc` into every thread it spawns.
pub trait ErrorReporter: Send + Sync {
    /// Reports an error from a station.
    fn report(&self, station: &str, error: &StationError);
}

/// Reporter that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl ErrorReporter for LogReporter {
    fn report(&self, station: &str, error: &StationError) {
        match error {
            StationError::Recoverable(msg) => tracing::warn!(station, "{}", msg),
            StationError::Fatal(msg) => tracing::error!(station, "{}", msg),
        }
    }
}

/// Reporter that keeps every report in memory.
#[derive(Debug, Default)]
pub struct CollectorReporter {
    reports: Mutex<Vec<(String, StationError)>>,
}

impl CollectorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything reported so far.
    pub fn reports(&self) -> Vec<(String, StationError)> {
        self.reports
            .lock()
            .map(|reports| reports.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.reports.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorReporter for CollectorReporter {
    fn report(&self, station: &str, error: &StationError) {
        if let Ok(mut reports) = self.reports.lock() {
            reports.push((station.to_string(), error.clone()));
        }
    }
}
