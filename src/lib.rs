//! ctgscore - Fisher-score grading of fetal heart-rate recordings
//!
//! Reads a directory of cardiotocography recordings in parallel, derives
//! basal rhythm, amplitude, variability, accelerations and decelerations for
//! each one, and classifies the recording as good or poor.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod decode;
pub mod defaults;
pub mod error;
#[cfg(feature = "cli")]
pub mod logging;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod signal;

// Composition root - needs everything
#[cfg(feature = "cli")]
pub mod app;

// Core traits (decode → analyze → render)
pub use decode::{Decoder, DictDecoder, Format, JsonDecoder};
pub use plot::Visualizer;
pub use signal::{FisherAnalyzer, Grade, Recording};

// Pipeline
pub use pipeline::{Pipeline, PipelineConfig, ResultMap};

// Error handling
pub use error::{CtgError, Result};

// Config
pub use config::Config;

// Station framework (for advanced users)
pub use pipeline::{ErrorReporter, Station, StationError};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_contains_plus_when_git_hash_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            assert!(
                ver.contains('+'),
                "With GIT_HASH set, version should contain '+', got: {}",
                ver
            );
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
