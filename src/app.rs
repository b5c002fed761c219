//! Application entry points.
//!
//! Wires configuration, decoder, analyzer and visualizer into the pipeline
//! for the two run modes: grading (with the optional reference comparison)
//! and plotting.

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::pipeline::{Pipeline, ResultMap};
use crate::report::{self, Comparison};
use crate::signal::FisherAnalyzer;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Outcome of a grading run.
#[derive(Debug, Clone)]
pub struct ScoreSummary {
    pub results: ResultMap,
    /// `None` when the comparison was skipped or could not be made.
    pub comparison: Option<Comparison>,
}

/// Apply command-line flags on top of file and environment configuration.
pub fn apply_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    if let Some(dir) = &cli.dir {
        config.pipeline.dir = dir.clone();
    }
    if let Some(processes) = cli.processes {
        config.pipeline.processes = usize::from(processes);
    }
    if let Some(interval) = cli.poll_interval {
        config.pipeline.poll_interval_ms = duration_ms(interval);
    }
    if let Some(format) = cli.format {
        config.pipeline.format = format.into();
    }
    if cli.drop_artifacts {
        config.analysis.drop_artifacts = true;
    }
    if let Some(expected) = &cli.expected {
        config.report.expected = expected.clone();
    }
    if let Some(output) = &cli.report {
        config.report.output = output.clone();
    }
    if let Some(graphs) = &cli.graphs {
        config.plot.output_dir = graphs.clone();
    }
    config
}

// Rounded up so sub-millisecond intervals stay positive.
fn duration_ms(interval: Duration) -> u64 {
    let ms = interval.as_micros().div_ceil(1000);
    u64::try_from(ms).unwrap_or(u64::MAX)
}

fn pipeline(config: &Config) -> Pipeline {
    Pipeline::new(config.pipeline.to_pipeline_config())
}

/// Grade every recording, then optionally save the grades and compare them
/// with the reference.
///
/// A comparison failure is logged and leaves `comparison` empty; it never
/// fails the run.
pub fn run_score(
    config: &Config,
    compare: bool,
    save_results: Option<&Path>,
) -> Result<ScoreSummary> {
    config.validate()?;
    tracing::info!(
        dir = %config.pipeline.dir.display(),
        processes = config.pipeline.processes,
        format = ?config.pipeline.format,
        "grading recordings"
    );

    let results = pipeline(config).score(
        &config.pipeline.dir,
        config.pipeline.format.decoder(),
        FisherAnalyzer::new(config.analysis.clone()),
    )?;

    if let Some(path) = save_results {
        report::save_results(path, &results)?;
        tracing::info!(path = %path.display(), "computed grades saved");
    }

    let comparison = if compare {
        match compare_with_reference(config, &results) {
            Ok(comparison) => Some(comparison),
            Err(e) => {
                tracing::error!("comparison skipped: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(ScoreSummary {
        results,
        comparison,
    })
}

fn compare_with_reference(config: &Config, results: &ResultMap) -> Result<Comparison> {
    let expected = report::load_expected(&config.report.expected)?;
    let comparison = Comparison::new(&expected, results);
    for file in comparison.missing() {
        tracing::warn!(file, "no computed grade for reference file");
    }
    comparison.write_report(&config.report.output)?;
    Ok(comparison)
}

/// Render every recording into the configured output directory.
#[cfg(feature = "plot")]
pub fn run_visualize(config: &Config) -> Result<Vec<PathBuf>> {
    use crate::plot::PngPlotter;
    use std::sync::Arc;

    config.validate()?;
    tracing::info!(
        dir = %config.pipeline.dir.display(),
        output_dir = %config.plot.output_dir.display(),
        "plotting recordings"
    );
    pipeline(config).plot(
        &config.pipeline.dir,
        config.pipeline.format.decoder(),
        Arc::new(PngPlotter::new(&config.plot.output_dir)),
    )
}

#[cfg(not(feature = "plot"))]
pub fn run_visualize(_config: &Config) -> Result<Vec<PathBuf>> {
    Err(crate::error::CtgError::Plot {
        message: "built without the `plot` feature".to_string(),
    })
}
