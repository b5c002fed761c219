//! Command-line interface for ctgscore
//!
//! Provides argument parsing using clap derive macros.

use crate::decode::Format;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Fisher-score grading of fetal heart-rate recordings
#[derive(Parser, Debug)]
#[command(
    name = "ctgscore",
    version,
    about = "Fisher-score grading of fetal heart-rate recordings"
)]
pub struct Cli {
    /// Directory of recording files (default: ./ctg_files)
    #[arg(long, short = 'd', value_name = "PATH")]
    pub dir: Option<PathBuf>,

    /// Reader and worker thread count (default: 8)
    #[arg(long, short = 'p', value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub processes: Option<u16>,

    /// Render every recording to a PNG instead of grading
    #[arg(long)]
    pub visualize: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Reference grades to compare against (default: expected_result.json)
    #[arg(long, value_name = "PATH")]
    pub expected: Option<PathBuf>,

    /// Where to write the comparison report (default: comparison.json)
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Skip the comparison against reference grades
    #[arg(long)]
    pub no_compare: bool,

    /// Write computed grades as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub save_results: Option<PathBuf>,

    /// Output directory for plots (default: ./graphs)
    #[arg(long, value_name = "DIR")]
    pub graphs: Option<PathBuf>,

    /// Recording file format
    #[arg(long, value_enum, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Drop out-of-range readings before analysis
    #[arg(long)]
    pub drop_artifacts: bool,

    /// Queue poll interval (default: 1s). Examples: 250ms, 2s
    #[arg(long, value_name = "DURATION", value_parser = parse_poll_interval)]
    pub poll_interval: Option<Duration>,

    /// Suppress output (quiet mode)
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose output (-v: per-file metrics, -vv: full diagnostics)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Recording file format accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Literal list of `{'Key': k, 'Value': v}` records
    Dict,
    /// JSON array of `{"Key": k, "Value": v}` objects
    Json,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Dict => Format::Dict,
            FormatArg::Json => Format::Json,
        }
    }
}

/// Parse a poll interval.
///
/// Bare numbers are seconds; anything else goes through `humantime`
/// (`250ms`, `2s`, `1m`). Zero is rejected.
fn parse_poll_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    let interval = match s.parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => humantime::parse_duration(s).map_err(|e| e.to_string())?,
    };
    if interval.is_zero() {
        return Err("poll interval must be positive".to_string());
    }
    Ok(interval)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["ctgscore"]).unwrap();
        assert!(cli.dir.is_none());
        assert!(cli.processes.is_none());
        assert!(!cli.visualize);
        assert!(cli.config.is_none());
        assert!(cli.expected.is_none());
        assert!(cli.report.is_none());
        assert!(!cli.no_compare);
        assert!(cli.save_results.is_none());
        assert!(cli.graphs.is_none());
        assert!(cli.format.is_none());
        assert!(!cli.drop_artifacts);
        assert!(cli.poll_interval.is_none());
        assert!(!cli.quiet);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_parse_with_options() {
        let cli = Cli::try_parse_from([
            "ctgscore",
            "--dir",
            "/data/ctg",
            "--processes",
            "4",
            "--expected",
            "ref.json",
            "--report",
            "out.json",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.dir, Some(PathBuf::from("/data/ctg")));
        assert_eq!(cli.processes, Some(4));
        assert_eq!(cli.expected, Some(PathBuf::from("ref.json")));
        assert_eq!(cli.report, Some(PathBuf::from("out.json")));
        assert_eq!(cli.format.map(Format::from), Some(Format::Json));
    }

    #[test]
    fn test_parse_visualize_with_graphs() {
        let cli = Cli::try_parse_from(["ctgscore", "--visualize", "--graphs", "/tmp/g"]).unwrap();
        assert!(cli.visualize);
        assert_eq!(cli.graphs, Some(PathBuf::from("/tmp/g")));
    }

    #[test]
    fn test_zero_processes_rejected() {
        assert!(Cli::try_parse_from(["ctgscore", "--processes", "0"]).is_err());
    }

    #[test]
    fn test_parse_verbose_double() {
        let cli = Cli::try_parse_from(["ctgscore", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_parse_quiet_short_flag() {
        let cli = Cli::try_parse_from(["ctgscore", "-q"]).unwrap();
        assert!(cli.quiet);
    }

    #[test]
    fn test_poll_interval_bare_number_is_seconds() {
        assert_eq!(parse_poll_interval("2"), Ok(Duration::from_secs(2)));
    }

    #[test]
    fn test_poll_interval_humantime() {
        assert_eq!(parse_poll_interval("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_poll_interval(" 1m "), Ok(Duration::from_secs(60)));
    }

    #[test]
    fn test_poll_interval_rejects_zero_and_garbage() {
        assert!(parse_poll_interval("0").is_err());
        assert!(parse_poll_interval("0s").is_err());
        assert!(parse_poll_interval("soon").is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        let err = Cli::try_parse_from(["ctgscore", "--format", "csv"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(["ctgscore", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_flag() {
        let err = Cli::try_parse_from(["ctgscore", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
