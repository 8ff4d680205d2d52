//! Report generation.
//!
//! Renders an [`Aggregate`] as Markdown or JSON. Colours come from the
//! single [`PresentationConfig`] passed in by the caller.
//!
//! [`Aggregate`]: crate::analysis::Aggregate
//! [`PresentationConfig`]: crate::config::PresentationConfig

pub mod generator;

pub use generator::*;

use crate::analysis::Aggregate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a report run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    /// When the report was generated.
    pub generated_at: DateTime<Utc>,
    /// Files the records were loaded from.
    pub inputs: Vec<String>,
    /// Page share of the combined score.
    pub page_weight: f64,
    /// Severity filter applied to the issue list, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_severity: Option<String>,
    /// Groups dropped by the severity filter or --top.
    #[serde(default)]
    pub issues_omitted: usize,
}

/// A complete aggregation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub aggregate: Aggregate,
}
