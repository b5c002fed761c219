//! Parallel analysis pipeline.
//!
//! Reader threads decode files onto an unbounded crossbeam work queue; a fixed
//! pool of worker threads drains it and reports results back over a second
//! channel. Termination uses a single end-of-files marker plus a shared
//! completion signal.

pub mod error;
pub mod ingest;
pub mod orchestrator;
pub mod plot_station;
pub mod queue;
pub mod scoring_station;
pub mod station;
pub mod types;
pub mod worker;

pub use error::{CollectorReporter, ErrorReporter, LogReporter, StationError};
pub use ingest::{IngestStats, Ingestion, list_files, partition};
pub use orchestrator::{Pipeline, PipelineConfig, RunOutput};
pub use plot_station::PlotStation;
pub use queue::{CompletionSignal, Poll, WorkQueue};
pub use scoring_station::ScoringStation;
pub use station::Station;
pub use types::{DecodedMessage, DecodedRecording, GradedFile, ResultMap, WorkerEvent};
pub use worker::{Exit, WorkerContext, WorkerPool};
