use crate::error::{CtgError, Result};
use crate::signal::Recording;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

/// Trait for turning one recording file into samples.
///
/// This trait allows swapping file formats (dict literal, JSON, mock).
pub trait Decoder: Send + Sync {
    /// Decode the file at `path`.
    ///
    /// # Returns
    /// `Ok(None)` when the file holds no data, an error when it cannot be read
    /// or parsed.
    fn read(&self, path: &Path) -> Result<Option<Recording>>;

    /// Short format name for logging
    fn name(&self) -> &str;
}

/// Implement Decoder for Arc<T> to allow sharing across readers.
impl<T: Decoder> Decoder for Arc<T> {
    fn read(&self, path: &Path) -> Result<Option<Recording>> {
        (**self).read(path)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Mock decoder for testing. Ignores file contents.
#[derive(Debug, Clone, Default)]
pub struct MockDecoder {
    values: Vec<f64>,
    failing: HashSet<String>,
    empty: HashSet<String>,
}

impl MockDecoder {
    /// Create a mock that yields an empty recording for every file
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the samples returned for every file
    pub fn with_values(mut self, values: Vec<f64>) -> Self {
        self.values = values;
        self
    }

    /// Configure the mock to fail on files with this name
    pub fn failing_on(mut self, filename: &str) -> Self {
        self.failing.insert(filename.to_string());
        self
    }

    /// Configure the mock to return no data for files with this name
    pub fn empty_on(mut self, filename: &str) -> Self {
        self.empty.insert(filename.to_string());
        self
    }
}

impl Decoder for MockDecoder {
    fn read(&self, path: &Path) -> Result<Option<Recording>> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        if self.failing.contains(&name) {
            return Err(CtgError::Decode {
                path: path.display().to_string(),
                message: "mock decode failure".to_string(),
            });
        }
        if self.empty.contains(&name) {
            return Ok(None);
        }
        Ok(Some(Recording::from_values(self.values.iter().copied())))
    }

    fn name(&self) -> &str {
        "mock"
    }
}
