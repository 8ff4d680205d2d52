//! The aggregation pipeline.
//!
//! Every dashboard view consumes the same [`Aggregate`], so combined
//! scores and issue lists are derived in exactly one place.

use super::classifier::KeywordClassifier;
use super::{grouper, normalizer};
use crate::models::{
    CombinedScore, DimensionBreakdown, DomainAnalysis, GroupedIssue, IssueSummary, PageScore,
};
use crate::scoring::{self, ScoreWeights};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Immutable policy the aggregator runs with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatorConfig {
    pub weights: ScoreWeights,
    pub classifier: KeywordClassifier,
}

/// Everything the views need from one analysis fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    pub combined: CombinedScore,
    pub dimensions: Vec<DimensionBreakdown>,
    /// Grouped issues, most severe first.
    pub issues: Vec<GroupedIssue>,
    pub summary: IssueSummary,
}

/// Stateless aggregation over page and domain analyses.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    config: AggregatorConfig,
}

impl Aggregator {
    /// Create an aggregator with the given policy.
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Combined scores only.
    pub fn combine(&self, pages: &[PageScore], domains: &[DomainAnalysis]) -> CombinedScore {
        scoring::combine_with(pages, domains, &self.config.weights)
    }

    /// Grouped, severity-ranked issues only.
    pub fn issues(&self, pages: &[PageScore], domains: &[DomainAnalysis]) -> Vec<GroupedIssue> {
        let normalized = normalizer::normalize_with(pages, domains, &self.config.classifier);
        grouper::group_and_sort(&normalized)
    }

    /// Run the full pipeline.
    pub fn aggregate(&self, pages: &[PageScore], domains: &[DomainAnalysis]) -> Aggregate {
        debug!(
            "Aggregating {} pages and {} domains",
            pages.len(),
            domains.len()
        );

        let combined = self.combine(pages, domains);
        let dimensions = scoring::dimension_breakdown(pages, domains, &self.config.weights);
        let issues = self.issues(pages, domains);
        let summary = IssueSummary::from_groups(&issues);

        debug!(
            "Combined score {:.2} (pages {:.2}, domains {:.2}); {} issue groups from {} occurrences",
            combined.overall_score,
            combined.page_score,
            combined.domain_score,
            summary.total,
            summary.occurrences
        );

        Aggregate {
            combined,
            dimensions,
            issues,
            summary,
        }
    }
}
