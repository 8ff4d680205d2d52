//! Data models for the visibility aggregator.
//!
//! This module contains the input records produced by the page and domain
//! analysers, and the derived records (normalized issues, grouped issues,
//! combined scores) handed back to the dashboard.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Deserialize a field, reading an explicit `null` as the type's default.
///
/// `#[serde(default)]` only covers absent keys; the backend also sends
/// `null` for fields it has no value for.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn null_as_max_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<f64>::deserialize(deserializer).map(|v| v.unwrap_or_else(default_max_score))
}

/// One of the four fixed content-quality axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Technical,
    Structure,
    Authority,
    Quality,
}

impl Dimension {
    /// Every dimension, in display order.
    pub const ALL: [Dimension; 4] = [
        Dimension::Technical,
        Dimension::Structure,
        Dimension::Authority,
        Dimension::Quality,
    ];

    /// Returns the lowercase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Technical => "technical",
            Dimension::Structure => "structure",
            Dimension::Authority => "authority",
            Dimension::Quality => "quality",
        }
    }

    /// Parses a dimension name, ignoring case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "technical" => Some(Dimension::Technical),
            "structure" => Some(Dimension::Structure),
            "authority" => Some(Dimension::Authority),
            "quality" => Some(Dimension::Quality),
            _ => None,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Technical => write!(f, "Technical"),
            Dimension::Structure => write!(f, "Structure"),
            Dimension::Authority => write!(f, "Authority"),
            Dimension::Quality => write!(f, "Quality"),
        }
    }
}

/// Severity level of an issue.
///
/// Values outside the four known levels are carried verbatim in `Other`
/// and always rank after `Low`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Critical,
    High,
    #[default]
    Medium,
    Low,
    Other(String),
}

impl Severity {
    /// Sort rank, lowest first: critical(0) .. low(3), unknown(4).
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
            Severity::Other(_) => 4,
        }
    }

    /// Returns the lowercase name, or the unknown value as given.
    pub fn as_str(&self) -> &str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
            Severity::Other(s) => s,
        }
    }

    /// Returns an emoji representation of the severity.
    pub fn emoji(&self) -> &'static str {
        match self {
            Severity::Critical => "🔴",
            Severity::High => "🟠",
            Severity::Medium => "🟡",
            Severity::Low => "🟢",
            Severity::Other(_) => "⚪",
        }
    }

    /// Whether this severity is at least as severe as `other`.
    pub fn at_least(&self, other: &Severity) -> bool {
        self.rank() <= other.rank()
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Other(s.to_string()),
        }
    }
}

impl From<String> for Severity {
    fn from(s: String) -> Self {
        Severity::from(s.as_str())
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Critical => write!(f, "Critical"),
            Severity::High => write!(f, "High"),
            Severity::Medium => write!(f, "Medium"),
            Severity::Low => write!(f, "Low"),
            Severity::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Per-dimension scores in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DimensionScore {
    #[serde(deserialize_with = "null_as_default")]
    pub technical: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub structure: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub authority: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub quality: f64,
}

impl DimensionScore {
    /// Returns the score for one dimension.
    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Technical => self.technical,
            Dimension::Structure => self.structure,
            Dimension::Authority => self.authority,
            Dimension::Quality => self.quality,
        }
    }
}

/// A structured issue emitted by a rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
}

/// One rule's evaluation against one page or domain.
///
/// Produced once by the rule engine and never modified afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuleResult {
    #[serde(deserialize_with = "null_as_default")]
    pub rule_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_name: String,
    /// Dimension the rule scores; the backend calls this `category`.
    #[serde(alias = "dimension", deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub max_score: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub weight: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub evidence: Vec<serde_json::Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<RawIssue>,
}

impl RuleResult {
    /// Weighted contribution, `score / max_score * weight * 100`.
    pub fn contribution(&self) -> f64 {
        if self.max_score <= 0.0 {
            return 0.0;
        }
        self.score / self.max_score * self.weight * 100.0
    }
}

/// Scores attached to an analysed page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageScores {
    #[serde(flatten)]
    pub dimensions: DimensionScore,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_score: Option<f64>,
}

/// Analysis record for a single crawled URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageScore {
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub scores: PageScores,
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<RawIssue>,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_results: Vec<RuleResult>,
}

/// A raw score with its own scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreOutOf {
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
    #[serde(default = "default_max_score", deserialize_with = "null_as_max_score")]
    pub max_score: f64,
}

fn default_max_score() -> f64 {
    100.0
}

impl ScoreOutOf {
    /// Score rescaled to `[0, 100]`; `None` when the scale is unusable.
    pub fn normalized(&self) -> Option<f64> {
        if self.max_score > 0.0 {
            Some(self.score / self.max_score * 100.0)
        } else {
            None
        }
    }
}

/// Per-dimension results of a domain analysis. Absent dimensions stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisResults {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technical: Option<ScoreOutOf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structure: Option<ScoreOutOf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<ScoreOutOf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<ScoreOutOf>,
}

impl AnalysisResults {
    /// Returns the raw result for one dimension.
    pub fn get(&self, dimension: Dimension) -> Option<&ScoreOutOf> {
        match dimension {
            Dimension::Technical => self.technical.as_ref(),
            Dimension::Structure => self.structure.as_ref(),
            Dimension::Authority => self.authority.as_ref(),
            Dimension::Quality => self.quality.as_ref(),
        }
    }
}

/// Analysis record for a registered domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DomainAnalysis {
    #[serde(deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysis_results: AnalysisResults,
    #[serde(deserialize_with = "null_as_default")]
    pub rule_results: Vec<RuleResult>,
    /// Free-text issues with no structure.
    #[serde(deserialize_with = "null_as_default")]
    pub issues: Vec<String>,
}

/// Whether an issue came from a page or a domain analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    Page,
    Domain,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceType::Page => write!(f, "page"),
            SourceType::Domain => write!(f, "domain"),
        }
    }
}

/// An issue in the uniform shape shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedIssue {
    /// `rule_id` when known, otherwise `"{source}#{index}"`.
    pub id: String,
    /// Page URL or domain name.
    pub source: String,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_title: Option<String>,
    pub severity: Severity,
    pub dimension: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_name: Option<String>,
}

/// A place where a grouped issue was observed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedSource {
    pub source: String,
    pub source_type: SourceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl From<&NormalizedIssue> for AffectedSource {
    fn from(issue: &NormalizedIssue) -> Self {
        Self {
            source: issue.source.clone(),
            source_type: issue.source_type,
            title: issue.source_title.clone(),
        }
    }
}

/// Which kinds of source a grouped issue spans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceSummary {
    Domain,
    Pages,
    Mixed,
}

impl fmt::Display for SourceSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSummary::Domain => write!(f, "Domain"),
            SourceSummary::Pages => write!(f, "Pages"),
            SourceSummary::Mixed => write!(f, "Mixed"),
        }
    }
}

/// Duplicate occurrences of one issue collapsed into a single record.
///
/// `affected_sources` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupedIssue {
    pub issue_key: String,
    /// First occurrence seen; later duplicates never replace it.
    pub representative_issue: NormalizedIssue,
    pub dimension: String,
    pub affected_sources: Vec<AffectedSource>,
}

impl GroupedIssue {
    /// Severity of the representative issue.
    pub fn severity(&self) -> &Severity {
        &self.representative_issue.severity
    }

    /// Number of sources the issue was found on.
    pub fn occurrences(&self) -> usize {
        self.affected_sources.len()
    }

    /// `Domain` when every source is a domain, `Pages` when every source is
    /// a page, `Mixed` otherwise.
    pub fn summary_label(&self) -> SourceSummary {
        let all = |kind: SourceType| self.affected_sources.iter().all(|s| s.source_type == kind);
        if all(SourceType::Domain) {
            SourceSummary::Domain
        } else if all(SourceType::Page) {
            SourceSummary::Pages
        } else {
            SourceSummary::Mixed
        }
    }
}

/// Headline scores blended from pages and domains.
///
/// Values are kept unrounded; use [`CombinedScore::rounded`] for display.
/// `total_pages`/`total_domains` distinguish "no data" from "zero score".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedScore {
    pub overall_score: f64,
    pub page_score: f64,
    pub domain_score: f64,
    pub total_pages: usize,
    pub total_domains: usize,
}

impl CombinedScore {
    /// Whether any page or domain contributed.
    pub fn has_data(&self) -> bool {
        self.total_pages + self.total_domains > 0
    }

    /// Integer scores for summary cards.
    pub fn rounded(&self) -> RoundedScore {
        RoundedScore {
            overall_score: round_score(self.overall_score),
            page_score: round_score(self.page_score),
            domain_score: round_score(self.domain_score),
            total_pages: self.total_pages,
            total_domains: self.total_domains,
        }
    }
}

/// Presentation form of [`CombinedScore`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundedScore {
    pub overall_score: u32,
    pub page_score: u32,
    pub domain_score: u32,
    pub total_pages: usize,
    pub total_domains: usize,
}

/// Page, domain and blended values for one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    /// Mean over pages; 0 without pages.
    pub page: f64,
    /// Mean over domains carrying this dimension; `None` if none do.
    pub domain: Option<f64>,
    pub combined: f64,
}

impl DimensionBreakdown {
    /// Blended value rounded for charts.
    pub fn rounded(&self) -> u32 {
        round_score(self.combined)
    }
}

/// Rounds to the nearest integer, clamped to `0..=100`.
pub fn round_score(value: f64) -> u32 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u32
}

/// Counts over a grouped issue list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSummary {
    /// Number of distinct (grouped) issues.
    pub total: usize,
    /// Number of individual occurrences across all sources.
    pub occurrences: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    /// Groups with an unrecognised severity.
    pub other: usize,
    pub by_dimension: BTreeMap<String, usize>,
}

impl IssueSummary {
    /// Creates a summary from grouped issues.
    pub fn from_groups(groups: &[GroupedIssue]) -> Self {
        let mut summary = Self {
            total: groups.len(),
            ..Self::default()
        };

        for group in groups {
            summary.occurrences += group.occurrences();
            match group.severity() {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Other(_) => summary.other += 1,
            }

            *summary
                .by_dimension
                .entry(group.dimension.clone())
                .or_insert(0) += 1;
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(source: &str, source_type: SourceType, severity: Severity) -> NormalizedIssue {
        NormalizedIssue {
            id: format!("{}#0", source),
            source: source.to_string(),
            source_type,
            source_title: None,
            severity,
            dimension: "technical".to_string(),
            description: "Test".to_string(),
            recommendation: None,
            rule_id: None,
            rule_name: None,
        }
    }

    fn group_of(issues: &[NormalizedIssue]) -> GroupedIssue {
        GroupedIssue {
            issue_key: issues[0].id.clone(),
            representative_issue: issues[0].clone(),
            dimension: issues[0].dimension.clone(),
            affected_sources: issues.iter().map(AffectedSource::from).collect(),
        }
    }

    #[test]
    fn test_severity_rank() {
        assert_eq!(Severity::Critical.rank(), 0);
        assert_eq!(Severity::High.rank(), 1);
        assert_eq!(Severity::Medium.rank(), 2);
        assert_eq!(Severity::Low.rank(), 3);
        assert_eq!(Severity::Other("blocker".to_string()).rank(), 4);
    }

    #[test]
    fn test_severity_parse_keeps_unknown() {
        assert_eq!(Severity::from("CRITICAL"), Severity::Critical);
        assert_eq!(Severity::from(" high "), Severity::High);
        assert_eq!(
            Severity::from("Blocker"),
            Severity::Other("Blocker".to_string())
        );
    }

    #[test]
    fn test_severity_serde() {
        let sev: Severity = serde_json::from_str("\"Low\"").unwrap();
        assert_eq!(sev, Severity::Low);
        assert_eq!(serde_json::to_string(&sev).unwrap(), "\"low\"");

        let unknown: Severity = serde_json::from_str("\"urgent\"").unwrap();
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"urgent\"");
    }

    #[test]
    fn test_severity_at_least() {
        assert!(Severity::Critical.at_least(&Severity::High));
        assert!(Severity::High.at_least(&Severity::High));
        assert!(!Severity::Low.at_least(&Severity::Medium));
        assert!(!Severity::Other("x".into()).at_least(&Severity::Low));
    }

    #[test]
    fn test_dimension_parse() {
        assert_eq!(Dimension::parse("Technical"), Some(Dimension::Technical));
        assert_eq!(Dimension::parse("quality"), Some(Dimension::Quality));
        assert_eq!(Dimension::parse("General"), None);
    }

    #[test]
    fn test_contribution() {
        let rule = RuleResult {
            score: 5.0,
            max_score: 10.0,
            weight: 0.2,
            ..RuleResult::default()
        };
        assert!((rule.contribution() - 10.0).abs() < 1e-9);

        let broken = RuleResult {
            score: 5.0,
            max_score: 0.0,
            weight: 0.2,
            ..RuleResult::default()
        };
        assert_eq!(broken.contribution(), 0.0);
    }

    #[test]
    fn test_page_deserialize_defaults() {
        let page: PageScore = serde_json::from_str(r#"{"url": "https://a.test/"}"#).unwrap();
        assert_eq!(page.url, "https://a.test/");
        assert!(page.issues.is_empty());
        assert!(page.rule_results.is_empty());
        assert_eq!(page.scores.global_score, None);
        assert_eq!(page.scores.dimensions, DimensionScore::default());
    }

    #[test]
    fn test_page_deserialize_scores() {
        let page: PageScore = serde_json::from_str(
            r#"{
                "url": "https://a.test/",
                "scores": {"technical": 80, "structure": 70, "authority": 60, "quality": 50, "globalScore": 65},
                "issues": [{"severity": "high", "dimension": "technical", "description": "Slow"}]
            }"#,
        )
        .unwrap();
        assert_eq!(page.scores.dimensions.get(Dimension::Technical), 80.0);
        assert_eq!(page.scores.dimensions.get(Dimension::Quality), 50.0);
        assert_eq!(page.scores.global_score, Some(65.0));
        assert_eq!(page.issues[0].severity, Severity::High);
    }

    #[test]
    fn test_domain_deserialize_partial_results() {
        let domain: DomainAnalysis = serde_json::from_str(
            r#"{
                "domain": "a.test",
                "analysisResults": {"technical": {"score": 15, "maxScore": 20}},
                "issues": ["Missing HTTPS certificate"]
            }"#,
        )
        .unwrap();
        let technical = domain.analysis_results.get(Dimension::Technical).unwrap();
        assert_eq!(technical.normalized(), Some(75.0));
        assert!(domain.analysis_results.get(Dimension::Quality).is_none());
        assert_eq!(domain.overall_score, None);
    }

    #[test]
    fn test_missing_severity_defaults_to_medium() {
        let issue: RawIssue = serde_json::from_str(r#"{"description": "x"}"#).unwrap();
        assert_eq!(issue.severity, Severity::Medium);
    }

    #[test]
    fn test_null_collections_default_to_empty() {
        let page: PageScore = serde_json::from_str(
            r#"{"url": "https://a.test/", "scores": null, "issues": null, "ruleResults": null}"#,
        )
        .unwrap();
        assert!(page.issues.is_empty());
        assert!(page.rule_results.is_empty());
        assert_eq!(page.scores.global_score, None);

        let domain: DomainAnalysis = serde_json::from_str(
            r#"{"domain": "a.test", "overallScore": null, "analysisResults": null, "ruleResults": null, "issues": null}"#,
        )
        .unwrap();
        assert!(domain.issues.is_empty());
        assert!(domain.rule_results.is_empty());
        assert_eq!(domain.overall_score, None);
    }

    #[test]
    fn test_null_severity_defaults_to_medium() {
        let issue: RawIssue =
            serde_json::from_str(r#"{"severity": null, "description": null}"#).unwrap();
        assert_eq!(issue.severity, Severity::Medium);
        assert_eq!(issue.description, "");
    }

    #[test]
    fn test_null_numbers_default() {
        let result: ScoreOutOf = serde_json::from_str(r#"{"score": null, "maxScore": 20}"#).unwrap();
        assert_eq!(result.score, 0.0);
        assert_eq!(result.normalized(), Some(0.0));

        let result: ScoreOutOf = serde_json::from_str(r#"{"score": 40, "maxScore": null}"#).unwrap();
        assert_eq!(result.max_score, 100.0);

        let rule: RuleResult = serde_json::from_str(
            r#"{"ruleId": "r1", "category": null, "score": null, "maxScore": null, "weight": null, "evidence": null, "issues": null}"#,
        )
        .unwrap();
        assert_eq!(rule.contribution(), 0.0);
        assert!(rule.issues.is_empty());

        let page: PageScore = serde_json::from_str(
            r#"{"url": "https://a.test/", "scores": {"technical": null, "quality": 40}}"#,
        )
        .unwrap();
        assert_eq!(page.scores.dimensions.technical, 0.0);
        assert_eq!(page.scores.dimensions.quality, 40.0);
    }

    #[test]
    fn test_summary_label() {
        let page = issue("https://a.test/", SourceType::Page, Severity::Low);
        let domain = issue("a.test", SourceType::Domain, Severity::Low);

        assert_eq!(group_of(&[page.clone()]).summary_label(), SourceSummary::Pages);
        assert_eq!(
            group_of(&[domain.clone()]).summary_label(),
            SourceSummary::Domain
        );
        assert_eq!(
            group_of(&[page, domain]).summary_label(),
            SourceSummary::Mixed
        );
    }

    #[test]
    fn test_round_score() {
        assert_eq!(round_score(77.5), 78);
        assert_eq!(round_score(-3.0), 0);
        assert_eq!(round_score(140.0), 100);
        assert_eq!(round_score(f64::NAN), 0);
    }

    #[test]
    fn test_issue_summary() {
        let groups = vec![
            group_of(&[
                issue("https://a.test/", SourceType::Page, Severity::Critical),
                issue("https://b.test/", SourceType::Page, Severity::Critical),
            ]),
            group_of(&[issue("a.test", SourceType::Domain, Severity::Low)]),
            group_of(&[issue(
                "a.test",
                SourceType::Domain,
                Severity::Other("urgent".to_string()),
            )]),
        ];

        let summary = IssueSummary::from_groups(&groups);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.occurrences, 4);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.low, 1);
        assert_eq!(summary.other, 1);
        assert_eq!(summary.by_dimension.get("technical"), Some(&3));
    }
}
