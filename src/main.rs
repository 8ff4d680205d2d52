//! Visiscore - page and domain visibility score aggregator
//!
//! Loads page and domain analysis snapshots, runs the aggregation engine
//! and renders the combined score and grouped issues as Markdown or JSON.
//!
//! Exit codes:
//!   0 - Success (no issues above threshold, or no --fail-on set)
//!   1 - Runtime error (unreadable input, invalid config, etc.)
//!   2 - Issues found at or above --fail-on threshold

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use visiscore::analysis::{filter_min_severity, top_groups, Aggregator};
use visiscore::cli::{Args, OutputFormat};
use visiscore::config::{Config, DEFAULT_CONFIG_FILE};
use visiscore::loader::{self, Snapshot};
use visiscore::models::Severity;
use visiscore::report::{self, Report, ReportMetadata};

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args)?;

    info!("Visiscore v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    match run(args) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Aggregation failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .visiscore.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to customize weights, keyword rules, colours, and more.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so a report printed to stdout stays clean.
fn init_logging(args: &Args) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")
}

/// Run the aggregation workflow. Returns exit code (0 or 2).
fn run(args: Args) -> Result<i32> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let (snapshot, inputs) = load_input(&args)?;
    if snapshot.is_empty() {
        warn!("No page or domain records found");
    }

    let aggregator = Aggregator::new(config.aggregator_config());
    let mut aggregate = aggregator.aggregate(&snapshot.pages, &snapshot.domains);

    // Threshold is checked against every group, before any display filter.
    let fail_on = args.fail_on.map(Severity::from);
    let threshold_hit = fail_on
        .as_ref()
        .map(|t| aggregate.issues.iter().any(|g| g.severity().at_least(t)))
        .unwrap_or(false);

    let total_groups = aggregate.issues.len();
    let min_severity = args.min_severity.map(Severity::from);
    if let Some(ref min) = min_severity {
        aggregate.issues = filter_min_severity(aggregate.issues, min);
    }
    if let Some(n) = args.top {
        aggregate.issues = top_groups(&aggregate.issues, n);
    }
    let omitted = total_groups - aggregate.issues.len();
    if omitted > 0 {
        debug!("{} issue groups omitted from the report", omitted);
    }

    let report = Report {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            inputs,
            page_weight: config.scoring.page_weight,
            min_severity: min_severity.map(|s| s.to_string()),
            issues_omitted: omitted,
        },
        aggregate,
    };

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&report, &config.presentation)?,
        OutputFormat::Markdown => {
            report::generate_markdown_report(&report, config.report.max_sources)
        }
    };

    match args.output {
        Some(ref path) => {
            report::write_report(&output, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    let scores = report.aggregate.combined.rounded();
    let summary = &report.aggregate.summary;
    info!(
        "Overall {} (pages {}, domains {}) from {} pages and {} domains",
        scores.overall_score,
        scores.page_score,
        scores.domain_score,
        scores.total_pages,
        scores.total_domains
    );
    info!(
        "{} issue groups: {} critical, {} high, {} medium, {} low",
        summary.total, summary.critical, summary.high, summary.medium, summary.low
    );

    if threshold_hit {
        if let Some(threshold) = fail_on {
            eprintln!(
                "\n⛔ Issues found at or above {} severity. Failing (exit code 2).",
                threshold
            );
        }
        return Ok(2);
    }

    Ok(0)
}

/// Load every input named on the command line, in argument order.
fn load_input(args: &Args) -> Result<(Snapshot, Vec<String>)> {
    let mut snapshot = Snapshot::default();
    let mut inputs = Vec::new();

    if let Some(ref path) = args.input {
        snapshot.extend(loader::load_snapshot(path)?);
        inputs.push(path.display().to_string());
    }
    if let Some(ref path) = args.pages {
        snapshot.pages.extend(loader::load_pages(path)?);
        inputs.push(path.display().to_string());
    }
    if let Some(ref path) = args.domains {
        snapshot.domains.extend(loader::load_domains(path)?);
        inputs.push(path.display().to_string());
    }

    info!(
        "Loaded {} pages and {} domains",
        snapshot.pages.len(),
        snapshot.domains.len()
    );
    Ok((snapshot, inputs))
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {:#}", e);
            Ok(Config::default())
        }
    }
}
