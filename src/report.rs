//! Comparison of computed grades against a reference mapping.
//!
//! The reference file is a JSON object of file name to grade label. Labels may
//! be `Good`/`Poor` in any case or the reference-locale labels.

use crate::error::{CtgError, Result};
use crate::pipeline::ResultMap;
use crate::signal::Grade;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

/// Reference grades keyed by file name.
pub type ExpectedResults = BTreeMap<String, Grade>;

/// Loads the reference mapping.
///
/// A missing file, an unknown label or an empty mapping is an error.
pub fn load_expected(path: &Path) -> Result<ExpectedResults> {
    let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CtgError::ReferenceNotFound {
            path: path.display().to_string(),
        },
        _ => CtgError::Io(e),
    })?;

    let labels: BTreeMap<String, String> = serde_json::from_str(&contents)?;
    if labels.is_empty() {
        return Err(CtgError::ReferenceEmpty {
            path: path.display().to_string(),
        });
    }

    labels
        .into_iter()
        .map(|(file, label)| Ok((file, label.parse::<Grade>()?)))
        .collect()
}

/// Writes computed grades as a JSON object sorted by file name.
///
/// Grades use the reference-locale labels, so the file can serve as a
/// reference for a later comparison.
pub fn save_results(path: &Path, results: &ResultMap) -> Result<()> {
    let sorted: BTreeMap<&String, &str> = results
        .iter()
        .map(|(file, grade)| (file, grade.reference_label()))
        .collect();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &sorted)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// One line of the comparison report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonEntry {
    pub expected: Grade,
    /// `None` when the file produced no grade.
    pub computed: Option<Grade>,
}

impl ComparisonEntry {
    pub fn is_match(&self) -> bool {
        self.computed == Some(self.expected)
    }
}

/// Result of comparing computed grades with the reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub entries: BTreeMap<String, ComparisonEntry>,
}

impl Comparison {
    /// Compares over the reference keys; extra computed files are ignored.
    pub fn new(expected: &ExpectedResults, computed: &ResultMap) -> Self {
        let entries = expected
            .iter()
            .map(|(file, &grade)| {
                (
                    file.clone(),
                    ComparisonEntry {
                        expected: grade,
                        computed: computed.get(file).copied(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn matches(&self) -> usize {
        self.entries.values().filter(|e| e.is_match()).count()
    }

    /// Files in the reference that produced no grade.
    pub fn missing(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| e.computed.is_none())
            .map(|(file, _)| file.as_str())
            .collect()
    }

    /// Share of matching grades, 0–100. Zero for an empty comparison.
    pub fn percentage(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        self.matches() as f64 / self.total() as f64 * 100.0
    }

    /// Writes `{file: {expected, computed}}` as pretty JSON.
    pub fn write_report(&self, path: &Path) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, &self.entries)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::info!(report = %path.display(), "comparison result file created");
        Ok(())
    }
}
