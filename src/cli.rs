//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use crate::models::Severity;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Visiscore - page and domain visibility score aggregator
///
/// Combines page-level and domain-level analysis results into one
/// weighted score and a deduplicated, severity-ranked issue list.
///
/// Examples:
///   visiscore --input snapshot.json
///   visiscore --input snapshots/ --format json --output aggregate.json
///   visiscore --pages pages.json --domains domains.json --page-weight 0.7
///   visiscore --input snapshot.json --fail-on high
///   visiscore --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Snapshot file or directory of snapshot files
    ///
    /// A snapshot is a JSON object with `pages` and `domains` arrays.
    /// Directories are searched recursively for `.json` files.
    #[arg(
        short,
        long,
        value_name = "PATH",
        required_unless_present_any = ["pages", "domains", "init_config"]
    )]
    pub input: Option<PathBuf>,

    /// JSON file holding an array of page analyses
    #[arg(long, value_name = "FILE")]
    pub pages: Option<PathBuf>,

    /// JSON file holding an array of domain analyses
    #[arg(long, value_name = "FILE")]
    pub domains: Option<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .visiscore.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Fraction of the combined score attributed to pages (0.0 - 1.0)
    ///
    /// The domain share is 1 - page weight. Default: from config or 0.6.
    #[arg(long, value_name = "WEIGHT", env = "VISISCORE_PAGE_WEIGHT")]
    pub page_weight: Option<f64>,

    /// Output format (markdown, json). Default: from config or markdown.
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Minimum severity to include in the report
    ///
    /// Issues below this level are filtered out. Values: critical, high, medium, low
    #[arg(long, value_name = "LEVEL")]
    pub min_severity: Option<SeverityLevel>,

    /// Fail if issues at or above this severity are found
    ///
    /// Useful for CI pipelines. Exit code 2 when threshold is exceeded.
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<SeverityLevel>,

    /// Only report the N most severe issue groups
    #[arg(long, value_name = "COUNT")]
    pub top: Option<usize>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .visiscore.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for the report.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Markdown format (default)
    #[default]
    Markdown,
    /// JSON format
    Json,
}

/// Severity level for --fail-on and --min-severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SeverityLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityLevel> for Severity {
    fn from(level: SeverityLevel) -> Self {
        match level {
            SeverityLevel::Low => Severity::Low,
            SeverityLevel::Medium => Severity::Medium,
            SeverityLevel::High => Severity::High,
            SeverityLevel::Critical => Severity::Critical,
        }
    }
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.input.is_none() && self.pages.is_none() && self.domains.is_none() {
            return Err("Provide --input, --pages or --domains".to_string());
        }

        if let Some(weight) = self.page_weight {
            if !(0.0..=1.0).contains(&weight) {
                return Err("Page weight must be between 0.0 and 1.0".to_string());
            }
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if self.top == Some(0) {
            return Err("--top must be at least 1".to_string());
        }

        for path in [&self.input, &self.pages, &self.domains].into_iter().flatten() {
            if !path.exists() {
                return Err(format!("Input does not exist: {}", path.display()));
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args {
            input: Some(PathBuf::from("fixtures")),
            pages: None,
            domains: None,
            config: None,
            page_weight: None,
            format: None,
            output: None,
            min_severity: None,
            fail_on: None,
            top: None,
            verbose: false,
            quiet: false,
            init_config: false,
        }
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "visiscore",
            "--pages",
            "p.json",
            "--format",
            "json",
            "--min-severity",
            "high",
            "--page-weight",
            "0.7",
        ])
        .unwrap();
        assert_eq!(args.format, Some(OutputFormat::Json));
        assert_eq!(args.min_severity, Some(SeverityLevel::High));
        assert_eq!(args.page_weight, Some(0.7));
        assert!(args.input.is_none());
    }

    #[test]
    fn test_input_required() {
        assert!(Args::try_parse_from(["visiscore"]).is_err());
        assert!(Args::try_parse_from(["visiscore", "--init-config"]).is_ok());
    }

    #[test]
    fn test_validation_page_weight() {
        let mut args = make_args();
        args.page_weight = Some(1.5);
        assert!(args.validate().is_err());

        args.page_weight = Some(0.0);
        assert!(args.validate().is_ok());
    }

    #[test]
    fn test_validation_missing_input() {
        let mut args = make_args();
        args.input = Some(PathBuf::from("does/not/exist.json"));
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(), tracing::Level::INFO);

        args.verbose = true;
        assert_eq!(args.log_level(), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(), tracing::Level::ERROR);
    }

    #[test]
    fn test_severity_level_conversion() {
        assert_eq!(Severity::from(SeverityLevel::Critical), Severity::Critical);
        assert_eq!(Severity::from(SeverityLevel::Low), Severity::Low);
    }
}
