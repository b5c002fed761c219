//! Orchestrator: starts the analysis workers, runs ingestion, and collects
//! results until every worker has reported termination.

use crate::decode::Decoder;
use crate::defaults;
use crate::error::{CtgError, Result};
use crate::pipeline::error::{ErrorReporter, LogReporter, StationError};
use crate::pipeline::ingest::{IngestStats, Ingestion};
use crate::pipeline::plot_station::PlotStation;
use crate::pipeline::queue::{CompletionSignal, WorkQueue};
use crate::pipeline::scoring_station::ScoringStation;
use crate::pipeline::station::Station;
use crate::pipeline::types::{ResultMap, WorkerEvent};
use crate::pipeline::worker::{WorkerContext, WorkerPool};
use crate::plot::Visualizer;
use crate::signal::FisherAnalyzer;
use crossbeam_channel::unbounded;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Configuration for the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Number of reader threads in the ingestion stage
    pub readers: usize,
    /// Number of worker threads in the analysis stage
    pub workers: usize,
    /// Bounded wait of one queue poll
    pub poll_interval: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::with_processes(defaults::PROCESSES)
    }
}

impl PipelineConfig {
    /// Uses `processes` threads for both stages.
    pub fn with_processes(processes: usize) -> Self {
        Self {
            readers: processes,
            workers: processes,
            poll_interval: Duration::from_millis(defaults::POLL_INTERVAL_MS),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.readers == 0 {
            return Err(CtgError::ConfigInvalidValue {
                key: "readers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.workers == 0 {
            return Err(CtgError::ConfigInvalidValue {
                key: "workers".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.poll_interval.is_zero() {
            return Err(CtgError::ConfigInvalidValue {
                key: "poll_interval".to_string(),
                message: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct RunOutput<T> {
    /// Station outputs in arrival order.
    pub outputs: Vec<T>,
    /// Termination markers received; equals the worker count on success.
    pub finished_workers: usize,
    pub ingest: IngestStats,
    pub elapsed: Duration,
}

/// Directory pipeline: readers → work queue → analysis workers → results.
pub struct Pipeline {
    config: PipelineConfig,
    error_reporter: Arc<dyn ErrorReporter>,
}

impl Pipeline {
    /// Creates a new pipeline with default error reporter.
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            error_reporter: Arc::new(LogReporter),
        }
    }

    /// Sets a custom error reporter.
    pub fn with_error_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.error_reporter = reporter;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Grades every recording in `dir`.
    ///
    /// Files that fail to decode are reported and left out of the map.
    pub fn score(
        &self,
        dir: &Path,
        decoder: Arc<dyn Decoder>,
        analyzer: FisherAnalyzer,
    ) -> Result<ResultMap> {
        let run = self.run(dir, decoder, ScoringStation::new(analyzer))?;
        let graded = run.outputs.len();

        let results: ResultMap = run
            .outputs
            .into_iter()
            .map(|g| (g.filename, g.grade))
            .collect();

        if graded > 0 {
            tracing::info!(
                files = graded,
                elapsed_ms = run.elapsed.as_millis() as u64,
                per_file_us = (run.elapsed / graded as u32).as_micros() as u64,
                "scoring finished"
            );
        }
        Ok(results)
    }

    /// Renders every recording in `dir`, returning the written image paths.
    pub fn plot(
        &self,
        dir: &Path,
        decoder: Arc<dyn Decoder>,
        visualizer: Arc<dyn Visualizer>,
    ) -> Result<Vec<PathBuf>> {
        visualizer.prepare()?;
        let run = self.run(dir, decoder, PlotStation::new(visualizer))?;
        tracing::info!(images = run.outputs.len(), "plotting finished");
        Ok(run.outputs)
    }

    /// Runs both stages with `station` applied to every decoded recording.
    ///
    /// Workers start first and idle on the queue; ingestion then fills the
    /// queue and appends the end-of-files marker. Returns once exactly one
    /// termination marker per worker has arrived.
    pub fn run<S: Station + Clone>(
        &self,
        dir: &Path,
        decoder: Arc<dyn Decoder>,
        station: S,
    ) -> Result<RunOutput<S::Output>> {
        self.config.validate()?;
        if !dir.is_dir() {
            return Err(CtgError::InputDirNotFound {
                path: dir.display().to_string(),
            });
        }

        let start = Instant::now();
        let (queue_tx, queue_rx) = WorkQueue::new().split();
        let signal = CompletionSignal::new();
        let (events_tx, events_rx) = unbounded();

        let ctx = WorkerContext {
            queue: queue_rx,
            signal: signal.clone(),
            events: events_tx,
            reporter: self.error_reporter.clone(),
            poll_interval: self.config.poll_interval,
        };
        let pool = match WorkerPool::spawn(self.config.workers, station, ctx) {
            Ok(pool) => pool,
            Err(e) => {
                // Already spawned workers see the signal (or the closed queue) and exit
                signal.set();
                return Err(e);
            }
        };
        tracing::info!(workers = pool.len(), station = pool.name(), "working threads started");

        let ingestion = Ingestion::new(
            self.config.readers,
            decoder,
            self.error_reporter.clone(),
        );
        let ingest = ingestion.run(dir, queue_tx);
        if ingest.is_err() {
            signal.set();
        }

        let mut outputs = Vec::new();
        let mut finished_workers = 0;
        while finished_workers < pool.len() {
            match events_rx.recv() {
                Ok(WorkerEvent::Output(output)) => outputs.push(output),
                Ok(WorkerEvent::Finished { worker }) => {
                    finished_workers += 1;
                    tracing::debug!(worker, finished_workers, "worker finished");
                }
                // Every worker dropped its sender without a marker
                Err(_) => break,
            }
        }

        let expected = pool.len();
        if let Err(msg) = pool.join() {
            self.error_reporter
                .report("orchestrator", &StationError::Fatal(msg));
        }
        tracing::info!(finished_workers, "working threads have finished");

        let ingest = ingest?;
        if finished_workers != expected {
            return Err(CtgError::Pipeline {
                message: format!(
                    "only {} of {} workers reported termination",
                    finished_workers, expected
                ),
            });
        }

        Ok(RunOutput {
            outputs,
            finished_workers,
            ingest,
            elapsed: start.elapsed(),
        })
    }
}
