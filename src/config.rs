use crate::decode::Format;
use crate::defaults;
use crate::error::{CtgError, Result};
use crate::pipeline::PipelineConfig;
use crate::signal::AnalysisConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub pipeline: PipelineSection,
    pub analysis: AnalysisConfig,
    pub report: ReportConfig,
    pub plot: PlotConfig,
    pub log: LogConfig,
}

/// Input directory and thread configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineSection {
    pub dir: PathBuf,
    /// Thread count for both the reader and the worker stage
    pub processes: usize,
    pub poll_interval_ms: u64,
    pub format: Format,
}

/// Reference comparison configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    pub expected: PathBuf,
    pub output: PathBuf,
}

/// Visualization configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub output_dir: PathBuf,
}

/// Log output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    /// Also append log lines to this file; `None` logs to stderr only.
    pub file: Option<PathBuf>,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(defaults::INPUT_DIR),
            processes: defaults::PROCESSES,
            poll_interval_ms: defaults::POLL_INTERVAL_MS,
            format: Format::default(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            expected: PathBuf::from(defaults::EXPECTED_RESULT_FILE),
            output: PathBuf::from(defaults::REPORT_FILE),
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(defaults::GRAPHS_DIR),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file: Some(PathBuf::from(defaults::LOG_FILE)),
        }
    }
}

impl PipelineSection {
    /// Thread and polling settings for [`crate::pipeline::Pipeline`].
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            ..PipelineConfig::with_processes(self.processes)
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    ///
    /// Only returns defaults if the file is missing.
    /// Returns errors for invalid TOML.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e)
                if e.downcast_ref::<std::io::Error>()
                    .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound) =>
            {
                Ok(Self::default())
            }
            Err(e) => Err(e.context(format!("Failed to load config from {}", path.display()))),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - CTG_DIR → pipeline.dir
    /// - CTG_PROCESSES → pipeline.processes (ignored unless a positive integer)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("CTG_DIR")
            && !dir.is_empty()
        {
            self.pipeline.dir = PathBuf::from(dir);
        }

        if let Ok(processes) = std::env::var("CTG_PROCESSES")
            && let Ok(n) = processes.trim().parse::<usize>()
        {
            if n > 0 {
                self.pipeline.processes = n;
            } else {
                tracing::warn!("CTG_PROCESSES must be at least 1, ignoring");
            }
        }

        self
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.pipeline.processes == 0 {
            return Err(CtgError::ConfigInvalidValue {
                key: "pipeline.processes".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.pipeline.poll_interval_ms == 0 {
            return Err(CtgError::ConfigInvalidValue {
                key: "pipeline.poll_interval_ms".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        self.analysis.validate()
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/ctgscore/ctgscore.toml on Linux, `None` when the
    /// platform has no config directory.
    #[cfg(feature = "cli")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("ctgscore").join("ctgscore.toml"))
    }
}
