//! Weighted page/domain score blending.
//!
//! The headline score is `page * 0.6 + domain * 0.4` unless the host
//! overrides the page weight. An empty side contributes zero and the
//! weights are not renormalized, so a dashboard with pages but no domains
//! tops out at 60.

use crate::models::{CombinedScore, Dimension, DimensionBreakdown, DomainAnalysis, PageScore};
use serde::{Deserialize, Serialize};

/// Share of the combined score attributed to page analysis.
pub const DEFAULT_PAGE_WEIGHT: f64 = 0.6;

/// Page/domain split used when blending scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub page_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            page_weight: DEFAULT_PAGE_WEIGHT,
        }
    }
}

impl ScoreWeights {
    /// Creates weights with the given page share.
    pub fn new(page_weight: f64) -> Self {
        Self { page_weight }
    }

    /// Remaining share, `1 - page_weight`.
    pub fn domain_weight(&self) -> f64 {
        1.0 - self.page_weight
    }

    /// Blends a page value with a domain value.
    pub fn blend(&self, page: f64, domain: f64) -> f64 {
        page * self.page_weight + domain * self.domain_weight()
    }
}

/// Combine page and domain scores with the default 60/40 split.
pub fn combine(pages: &[PageScore], domains: &[DomainAnalysis]) -> CombinedScore {
    combine_with(pages, domains, &ScoreWeights::default())
}

/// Combine page and domain scores with explicit weights.
pub fn combine_with(
    pages: &[PageScore],
    domains: &[DomainAnalysis],
    weights: &ScoreWeights,
) -> CombinedScore {
    let page_score = mean(pages.iter().map(page_global_score));
    let domain_score = mean(domains.iter().map(domain_overall_score));

    CombinedScore {
        overall_score: weights.blend(page_score, domain_score),
        page_score,
        domain_score,
        total_pages: pages.len(),
        total_domains: domains.len(),
    }
}

/// Per-dimension blended values, in [`Dimension::ALL`] order.
///
/// Page means are zero-filled over all pages. Domain means only count
/// domains that actually report the dimension.
pub fn dimension_breakdown(
    pages: &[PageScore],
    domains: &[DomainAnalysis],
    weights: &ScoreWeights,
) -> Vec<DimensionBreakdown> {
    Dimension::ALL
        .iter()
        .map(|&dimension| {
            let page = mean(pages.iter().map(|p| p.scores.dimensions.get(dimension)));
            let domain = domain_dimension_average(domains, dimension);

            DimensionBreakdown {
                dimension,
                page,
                domain,
                combined: weights.blend(page, domain.unwrap_or(0.0)),
            }
        })
        .collect()
}

/// Mean normalized score for one dimension over the domains that carry it.
pub fn domain_dimension_average(domains: &[DomainAnalysis], dimension: Dimension) -> Option<f64> {
    let values: Vec<f64> = domains
        .iter()
        .filter_map(|d| d.analysis_results.get(dimension))
        .filter_map(|r| r.normalized())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(mean(values.into_iter()))
    }
}

/// The page's reported global score, `0` when absent.
pub fn page_global_score(page: &PageScore) -> f64 {
    page.scores.global_score.unwrap_or(0.0)
}

/// The domain's reported overall score, `0` when absent.
pub fn domain_overall_score(domain: &DomainAnalysis) -> f64 {
    domain.overall_score.unwrap_or(0.0)
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}
