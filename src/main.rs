use anyhow::{Context, Result};
use clap::Parser;
use ctgscore::app::{apply_cli_overrides, run_score, run_visualize};
use ctgscore::cli::Cli;
use ctgscore::config::Config;
use ctgscore::logging::init_tracing;
use owo_colors::OwoColorize;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    let config = apply_cli_overrides(config, &cli);
    config.validate().context("invalid configuration")?;

    init_tracing(cli.quiet, cli.verbose, config.log.file.as_deref())
        .context("failed to initialize logging")?;
    tracing::info!(version = %ctgscore::version_string(), "ctgscore starting");

    if cli.visualize {
        let images = run_visualize(&config)?;
        if !cli.quiet {
            println!(
                "{} {} plots written to {}",
                "✓".green(),
                images.len(),
                config.plot.output_dir.display()
            );
        }
        return Ok(());
    }

    let summary = run_score(&config, !cli.no_compare, cli.save_results.as_deref())?;
    if cli.quiet {
        return Ok(());
    }

    println!("Graded {} recordings", summary.results.len());
    if let Some(comparison) = summary.comparison {
        let line = format!(
            "Percentage of matches: {:.2}% ({}/{})",
            comparison.percentage(),
            comparison.matches(),
            comparison.total()
        );
        if comparison.matches() == comparison.total() {
            println!("{}", line.green());
        } else {
            println!("{}", line.yellow());
        }
        println!("Report: {}", config.report.output.display());
    }

    Ok(())
}

/// Load configuration from file (if present) and apply environment variable overrides.
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path).with_context(|| format!("failed to load {}", path.display()))?
    } else if let Some(default_path) = Config::default_path() {
        Config::load_or_default(&default_path)?
    } else {
        Config::default()
    };

    Ok(config.with_env_overrides())
}
