//! Analysis worker pool and its termination protocol.
//!
//! Only one worker can dequeue the single `EndOfFiles` message. That worker
//! sets the shared completion signal; every other worker checks the signal
//! before each poll and stops as soon as it sees it. Either way, each worker
//! sends exactly one `Finished` event.

use crate::error::Result;
use crate::pipeline::error::{ErrorReporter, StationError};
use crate::pipeline::queue::{CompletionSignal, Poll, poll};
use crate::pipeline::station::Station;
use crate::pipeline::types::{DecodedMessage, WorkerEvent};
use crossbeam_channel::{Receiver, Sender};
use std::marker::PhantomData;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shared handles every worker needs.
pub struct WorkerContext<O> {
    pub queue: Receiver<DecodedMessage>,
    pub signal: CompletionSignal,
    pub events: Sender<WorkerEvent<O>>,
    pub reporter: Arc<dyn ErrorReporter>,
    /// Bounded wait of one dequeue attempt.
    pub poll_interval: Duration,
}

impl<O> Clone for WorkerContext<O> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
            signal: self.signal.clone(),
            events: self.events.clone(),
            reporter: self.reporter.clone(),
            poll_interval: self.poll_interval,
        }
    }
}

/// How a worker loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// Dequeued the end-of-files marker.
    EndOfFiles,
    /// Observed the completion signal set by another worker.
    Signalled,
    /// Queue closed before any end-of-files marker was seen.
    Disconnected,
    /// The station failed fatally or the orchestrator went away.
    Aborted,
}

/// A fixed set of worker threads sharing one station type.
pub struct WorkerPool<S: Station> {
    handles: Vec<JoinHandle<Exit>>,
    station_name: &'static str,
    _phantom: PhantomData<S>,
}

impl<S: Station + Clone> WorkerPool<S> {
    /// Spawns `count` workers, each with its own clone of `station`.
    ///
    /// Workers start idle, blocked on the queue.
    pub fn spawn(count: usize, station: S, ctx: WorkerContext<S::Output>) -> Result<Self> {
        let station_name = station.name();
        let mut handles = Vec::with_capacity(count);

        for worker in 0..count {
            let mut station = station.clone();
            let ctx = ctx.clone();
            let handle = thread::Builder::new()
                .name(format!("ctg-{}-{}", station_name, worker))
                .spawn(move || run_worker(worker, &mut station, ctx))?;
            handles.push(handle);
        }

        Ok(Self {
            handles,
            station_name,
            _phantom: PhantomData,
        })
    }
}

impl<S: Station> WorkerPool<S> {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn name(&self) -> &'static str {
        self.station_name
    }

    /// Waits for every worker and returns how each one stopped.
    pub fn join(self) -> std::result::Result<Vec<Exit>, String> {
        let mut exits = Vec::with_capacity(self.handles.len());
        let mut panicked = 0;
        for handle in self.handles {
            match handle.join() {
                Ok(exit) => exits.push(exit),
                Err(_) => panicked += 1,
            }
        }
        if panicked > 0 {
            return Err(format!(
                "{} '{}' worker thread(s) panicked",
                panicked, self.station_name
            ));
        }
        Ok(exits)
    }
}

/// Main loop of one worker.
fn run_worker<S: Station>(worker: usize, station: &mut S, ctx: WorkerContext<S::Output>) -> Exit {
    let station_name = station.name();

    let exit = loop {
        if ctx.signal.is_set() {
            tracing::debug!(worker, station = station_name, "completion signal observed");
            break Exit::Signalled;
        }

        match poll(&ctx.queue, ctx.poll_interval) {
            Poll::Empty => {
                tracing::debug!(worker, station = station_name, "work queue empty, retrying");
            }
            Poll::Disconnected => {
                if ctx.signal.set() {
                    tracing::warn!(
                        worker,
                        station = station_name,
                        "work queue closed without end-of-files marker"
                    );
                }
                break Exit::Disconnected;
            }
            Poll::Message(DecodedMessage::EndOfFiles) => {
                tracing::info!(worker, station = station_name, "end-of-files marker received");
                ctx.signal.set();
                break Exit::EndOfFiles;
            }
            Poll::Message(DecodedMessage::Data(input)) => {
                let filename = input.filename.clone();
                match station.process(input) {
                    Ok(Some(output)) => {
                        if ctx.events.send(WorkerEvent::Output(output)).is_err() {
                            // Orchestrator gone, nothing left to report to
                            break Exit::Aborted;
                        }
                        tracing::debug!(worker, file = %filename, "processed");
                    }
                    Ok(None) => {}
                    Err(StationError::Recoverable(msg)) => {
                        ctx.reporter
                            .report(station_name, &StationError::Recoverable(msg));
                    }
                    Err(StationError::Fatal(msg)) => {
                        ctx.reporter.report(station_name, &StationError::Fatal(msg));
                        break Exit::Aborted;
                    }
                }
            }
        }
    };

    station.shutdown();

    if ctx.events.send(WorkerEvent::Finished { worker }).is_err() {
        tracing::debug!(worker, "orchestrator gone before termination marker");
    }

    exit
}
