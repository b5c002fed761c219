//! Ingestion stage: directory listing → reader threads → work queue.

use crate::decode::Decoder;
use crate::error::{CtgError, Result};
use crate::pipeline::error::{ErrorReporter, StationError};
use crate::pipeline::types::{DecodedMessage, DecodedRecording};
use crossbeam_channel::Sender;
use std::fs;
use std::ops::AddAssign;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

const STATION_NAME: &str = "reader";

/// Counters collected while reading one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub listed: usize,
    pub enqueued: usize,
    pub skipped: usize,
}

impl AddAssign for IngestStats {
    fn add_assign(&mut self, other: Self) {
        self.listed += other.listed;
        self.enqueued += other.enqueued;
        self.skipped += other.skipped;
    }
}

/// Lists the entries of `dir`, sorted by file name.
///
/// Entries of every kind are returned; readers skip non-regular files.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(CtgError::InputDirNotFound {
            path: dir.display().to_string(),
        });
    }
    let mut files = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    files.sort();
    Ok(files)
}

/// Splits `items` into `parts` contiguous chunks of `ceil(len / parts)`.
///
/// Always returns `parts` slices; trailing ones may be short or empty.
pub fn partition<T>(items: &[T], parts: usize) -> Vec<&[T]> {
    if parts == 0 {
        return Vec::new();
    }
    let size = items.len().div_ceil(parts);
    (0..parts)
        .map(|i| {
            let start = (i * size).min(items.len());
            let end = ((i + 1) * size).min(items.len());
            &items[start..end]
        })
        .collect()
}

/// Reads a directory with a fixed number of reader threads.
pub struct Ingestion {
    readers: usize,
    decoder: Arc<dyn Decoder>,
    reporter: Arc<dyn ErrorReporter>,
}

impl Ingestion {
    pub fn new(
        readers: usize,
        decoder: Arc<dyn Decoder>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            readers: readers.max(1),
            decoder,
            reporter,
        }
    }

    /// Decodes every file of `dir` onto `queue`, then enqueues one `EndOfFiles`.
    ///
    /// The marker is sent only after every reader has been joined, so no data
    /// message can follow it. Per-file failures are reported and skipped.
    pub fn run(&self, dir: &Path, queue: Sender<DecodedMessage>) -> Result<IngestStats> {
        let files = list_files(dir)?;
        let chunks = partition(&files, self.readers);
        let active = chunks.iter().filter(|c| !c.is_empty()).count();

        let stats = thread::scope(|scope| -> Result<IngestStats> {
            let mut handles = Vec::with_capacity(active);
            for (reader, chunk) in chunks.into_iter().enumerate() {
                if chunk.is_empty() {
                    continue;
                }
                let queue = queue.clone();
                let decoder = self.decoder.clone();
                let reporter = self.reporter.clone();
                let handle = thread::Builder::new()
                    .name(format!("ctg-reader-{}", reader))
                    .spawn_scoped(scope, move || {
                        read_chunk(chunk, decoder.as_ref(), &queue, reporter.as_ref())
                    })?;
                handles.push(handle);
            }
            tracing::info!(readers = handles.len(), files = files.len(), "file reading started");

            let mut stats = IngestStats::default();
            for handle in handles {
                match handle.join() {
                    Ok(chunk_stats) => stats += chunk_stats,
                    Err(_) => self.reporter.report(
                        STATION_NAME,
                        &StationError::Fatal("reader thread panicked".to_string()),
                    ),
                }
            }
            Ok(stats)
        })?;
        tracing::info!(
            enqueued = stats.enqueued,
            skipped = stats.skipped,
            "file reading finished"
        );

        queue
            .send(DecodedMessage::EndOfFiles)
            .map_err(|_| CtgError::Pipeline {
                message: "work queue closed before end-of-files marker".to_string(),
            })?;
        tracing::debug!("end-of-files marker enqueued");

        Ok(stats)
    }
}

/// Reader thread body: decode each file of the chunk and enqueue it.
fn read_chunk(
    files: &[PathBuf],
    decoder: &dyn Decoder,
    queue: &Sender<DecodedMessage>,
    reporter: &dyn ErrorReporter,
) -> IngestStats {
    let mut stats = IngestStats::default();

    for path in files {
        stats.listed += 1;
        let skip = |message: String, stats: &mut IngestStats| {
            reporter.report(STATION_NAME, &StationError::Recoverable(message));
            stats.skipped += 1;
        };

        if !path.is_file() {
            skip(format!("{} is not a file", path.display()), &mut stats);
            continue;
        }

        let recording = match decoder.read(path) {
            Ok(Some(recording)) if !recording.is_empty() => recording,
            Ok(_) => {
                skip(format!("data of file {} is empty", path.display()), &mut stats);
                continue;
            }
            Err(e) => {
                skip(e.to_string(), &mut stats);
                continue;
            }
        };

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!(
            file = %filename,
            samples = recording.len(),
            decoder = decoder.name(),
            "file read"
        );
        if queue
            .send(DecodedMessage::Data(DecodedRecording::new(filename, recording)))
            .is_err()
        {
            reporter.report(
                STATION_NAME,
                &StationError::Fatal("work queue closed while reading".to_string()),
            );
            break;
        }
        stats.enqueued += 1;
    }

    stats
}
