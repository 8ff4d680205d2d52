//! Markdown and JSON report generation.
//!
//! This module renders aggregation results into a Markdown document for
//! people, or a JSON view model (with palette colours resolved) for the
//! dashboard.

use super::{Report, ReportMetadata};
use crate::config::PresentationConfig;
use crate::models::{
    round_score, CombinedScore, DimensionBreakdown, GroupedIssue, IssueSummary, RoundedScore,
    Severity,
};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Generate a complete Markdown report.
///
/// At most `max_sources` affected sources are listed per issue.
pub fn generate_markdown_report(report: &Report, max_sources: usize) -> String {
    let mut output = String::new();
    let aggregate = &report.aggregate;

    output.push_str("# Visiscore Report\n\n");
    output.push_str(&generate_metadata_section(&report.metadata, &aggregate.combined));
    output.push_str(&generate_scores_section(
        &aggregate.combined,
        &aggregate.dimensions,
    ));
    output.push_str(&generate_summary_section(&aggregate.summary));
    output.push_str(&generate_issues_section(
        &aggregate.issues,
        report.metadata.issues_omitted,
        max_sources,
    ));
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata, combined: &CombinedScore) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !metadata.inputs.is_empty() {
        section.push_str(&format!("- **Inputs:** {}\n", metadata.inputs.join(", ")));
    }
    section.push_str(&format!("- **Pages Analyzed:** {}\n", combined.total_pages));
    section.push_str(&format!(
        "- **Domains Analyzed:** {}\n",
        combined.total_domains
    ));
    section.push_str(&format!(
        "- **Weighting:** {:.0}% pages / {:.0}% domains\n",
        metadata.page_weight * 100.0,
        (1.0 - metadata.page_weight) * 100.0
    ));
    if let Some(ref min) = metadata.min_severity {
        section.push_str(&format!("- **Minimum Severity:** {}\n", min));
    }
    section.push('\n');

    section
}

/// Generate the score tables.
fn generate_scores_section(combined: &CombinedScore, dimensions: &[DimensionBreakdown]) -> String {
    let mut section = String::new();

    section.push_str("## Scores\n\n");

    if !combined.has_data() {
        section.push_str("No analysis data yet.\n\n");
        return section;
    }

    let rounded = combined.rounded();
    section.push_str("| **Overall** | Pages | Domains |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| **{}** | {} | {} |\n\n",
        rounded.overall_score,
        side_score(rounded.page_score, combined.total_pages),
        side_score(rounded.domain_score, combined.total_domains),
    ));

    section.push_str("### Dimensions\n\n");
    section.push_str("| Dimension | Pages | Domains | Combined |\n");
    section.push_str("|:---|:---:|:---:|:---:|\n");
    for d in dimensions {
        let domain = d
            .domain
            .map(|v| round_score(v).to_string())
            .unwrap_or_else(|| "n/a".to_string());
        section.push_str(&format!(
            "| {} | {} | {} | **{}** |\n",
            d.dimension,
            round_score(d.page),
            domain,
            d.rounded()
        ));
    }
    section.push('\n');

    section
}

fn side_score(score: u32, count: usize) -> String {
    if count == 0 {
        "n/a".to_string()
    } else {
        score.to_string()
    }
}

/// Generate the issue summary tables.
fn generate_summary_section(summary: &IssueSummary) -> String {
    let mut section = String::new();

    section.push_str("## Summary\n\n");
    section.push_str("### Issue Severity Breakdown\n\n");
    section.push_str(&format!(
        "| {} Critical | {} High | {} Medium | {} Low | **Total** | Occurrences |\n",
        Severity::Critical.emoji(),
        Severity::High.emoji(),
        Severity::Medium.emoji(),
        Severity::Low.emoji(),
    ));
    section.push_str("|:---:|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | **{}** | {} |\n\n",
        summary.critical,
        summary.high,
        summary.medium,
        summary.low,
        summary.total,
        summary.occurrences
    ));

    if summary.other > 0 {
        section.push_str(&format!(
            "*{} issue(s) have an unrecognised severity.*\n\n",
            summary.other
        ));
    }

    if !summary.by_dimension.is_empty() {
        section.push_str("### Issues by Dimension\n\n");
        section.push_str("| Dimension | Issues |\n");
        section.push_str("|:---|:---:|\n");

        let mut dimensions: Vec<_> = summary.by_dimension.iter().collect();
        dimensions.sort_by_key(|(_, count)| std::cmp::Reverse(*count));

        for (dimension, count) in dimensions {
            section.push_str(&format!("| {} | {} |\n", dimension, count));
        }
        section.push('\n');
    }

    section
}

/// Generate the issues section.
fn generate_issues_section(issues: &[GroupedIssue], omitted: usize, max_sources: usize) -> String {
    let mut section = String::new();

    section.push_str("## Issues\n\n");

    if issues.is_empty() {
        section.push_str("No issues to report. 🎉\n\n");
    }

    for issue in issues {
        section.push_str(&generate_issue_block(issue, max_sources));
    }

    if omitted > 0 {
        section.push_str(&format!("*{} more issue(s) not shown.*\n\n", omitted));
    }

    section
}

/// Generate a single issue block.
fn generate_issue_block(issue: &GroupedIssue, max_sources: usize) -> String {
    let mut block = String::new();
    let rep = &issue.representative_issue;

    block.push_str(&format!(
        "#### {} **{}** {} - {}\n\n",
        rep.severity.emoji(),
        rep.severity.to_string().to_uppercase(),
        issue.dimension,
        rep.description
    ));

    match (&rep.rule_name, &rep.rule_id) {
        (Some(name), Some(id)) => block.push_str(&format!("**Rule:** {} (`{}`)\n\n", name, id)),
        (None, Some(id)) => block.push_str(&format!("**Rule:** `{}`\n\n", id)),
        _ => {}
    }

    block.push_str(&format!(
        "**Affected:** {} ({})\n\n",
        issue.summary_label(),
        issue.occurrences()
    ));

    for source in issue.affected_sources.iter().take(max_sources) {
        match source.title {
            Some(ref title) => block.push_str(&format!("- `{}` ({})\n", source.source, title)),
            None => block.push_str(&format!("- `{}`\n", source.source)),
        }
    }
    if issue.occurrences() > max_sources {
        block.push_str(&format!(
            "- ...and {} more\n",
            issue.occurrences() - max_sources
        ));
    }
    block.push('\n');

    if let Some(ref recommendation) = rep.recommendation {
        block.push_str(&format!("> 💡 **Recommendation:** {}\n\n", recommendation));
    }

    block.push_str("---\n\n");

    block
}

/// Generate the report footer.
fn generate_footer() -> String {
    "*Report generated by Visiscore*\n".to_string()
}

/// Dimension row with presentation values resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DimensionView<'a> {
    #[serde(flatten)]
    breakdown: &'a DimensionBreakdown,
    rounded: u32,
    color: &'a str,
}

/// Grouped issue with presentation values resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IssueView<'a> {
    #[serde(flatten)]
    issue: &'a GroupedIssue,
    severity: &'a Severity,
    severity_color: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimension_color: Option<&'a str>,
    sources_label: String,
    occurrences: usize,
}

/// JSON document consumed by the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    metadata: &'a ReportMetadata,
    combined: &'a CombinedScore,
    scores: RoundedScore,
    dimensions: Vec<DimensionView<'a>>,
    issues: Vec<IssueView<'a>>,
    summary: &'a IssueSummary,
}

/// Generate a JSON report with palette colours attached.
pub fn generate_json_report(report: &Report, palette: &PresentationConfig) -> Result<String> {
    let aggregate = &report.aggregate;

    let dimensions = aggregate
        .dimensions
        .iter()
        .map(|d| DimensionView {
            breakdown: d,
            rounded: d.rounded(),
            color: palette.dimension_color(d.dimension),
        })
        .collect();

    let issues = aggregate
        .issues
        .iter()
        .map(|g| IssueView {
            issue: g,
            severity: g.severity(),
            severity_color: palette.severity_color(g.severity()),
            dimension_color: palette.dimension_label_color(&g.dimension),
            sources_label: g.summary_label().to_string(),
            occurrences: g.occurrences(),
        })
        .collect();

    let doc = JsonReport {
        metadata: &report.metadata,
        combined: &aggregate.combined,
        scores: aggregate.combined.rounded(),
        dimensions,
        issues,
        summary: &aggregate.summary,
    };

    serde_json::to_string_pretty(&doc).map_err(Into::into)
}

/// Write rendered report content to a file.
pub fn write_report(content: &str, path: &Path) -> Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}
