//! Issue normalization.
//!
//! Converts structured rule issues and free-text domain issues into
//! [`NormalizedIssue`] records. A domain's rule-sourced issues replace its
//! free-text issues entirely; the strings are only used when no rule on
//! that domain reported anything.

use super::classifier::KeywordClassifier;
use crate::models::{DomainAnalysis, NormalizedIssue, PageScore, RawIssue, Severity, SourceType};

/// Dimension given to page issues that don't name one.
pub const GENERAL_DIMENSION: &str = "General";

/// Normalize issues with the built-in keyword table.
pub fn normalize(pages: &[PageScore], domains: &[DomainAnalysis]) -> Vec<NormalizedIssue> {
    normalize_with(pages, domains, &KeywordClassifier::default())
}

/// Normalize issues, classifying free-text domain issues with `classifier`.
///
/// Output lists every page's issues in page order, then every domain's.
pub fn normalize_with(
    pages: &[PageScore],
    domains: &[DomainAnalysis],
    classifier: &KeywordClassifier,
) -> Vec<NormalizedIssue> {
    let mut issues = Vec::new();

    for page in pages {
        issues.extend(normalize_page(page));
    }

    for domain in domains {
        issues.extend(normalize_domain(domain, classifier));
    }

    issues
}

/// Normalize the issues attached to one page.
pub fn normalize_page(page: &PageScore) -> Vec<NormalizedIssue> {
    page.issues
        .iter()
        .enumerate()
        .map(|(index, issue)| {
            let rule_id = non_empty(issue.rule_id.as_deref());
            let dimension = non_empty(issue.dimension.as_deref())
                .unwrap_or_else(|| GENERAL_DIMENSION.to_string());

            NormalizedIssue {
                id: issue_id(rule_id.as_deref(), &page.url, index),
                source: page.url.clone(),
                source_type: SourceType::Page,
                source_title: page.title.clone(),
                severity: issue.severity.clone(),
                dimension,
                description: issue.description.clone(),
                recommendation: issue.recommendation.clone(),
                rule_id,
                rule_name: non_empty(issue.rule_name.as_deref()),
            }
        })
        .collect()
}

/// Normalize one domain, preferring rule-sourced issues over free text.
pub fn normalize_domain(
    domain: &DomainAnalysis,
    classifier: &KeywordClassifier,
) -> Vec<NormalizedIssue> {
    let rule_issues: Vec<NormalizedIssue> = domain
        .rule_results
        .iter()
        .filter(|rule| !rule.issues.is_empty())
        .flat_map(|rule| rule.issues.iter().map(move |issue| (rule, issue)))
        .enumerate()
        .map(|(index, (rule, issue))| {
            let rule_id =
                non_empty(Some(rule.rule_id.as_str())).or_else(|| non_empty(issue.rule_id.as_deref()));
            let rule_name = non_empty(Some(rule.rule_name.as_str()))
                .or_else(|| non_empty(issue.rule_name.as_deref()));
            let dimension = non_empty(Some(rule.category.as_str()))
                .or_else(|| non_empty(issue.dimension.as_deref()))
                .unwrap_or_else(|| GENERAL_DIMENSION.to_string());

            domain_issue(domain, index, issue, rule_id, rule_name, dimension)
        })
        .collect();

    if !rule_issues.is_empty() {
        return rule_issues;
    }

    domain
        .issues
        .iter()
        .enumerate()
        .map(|(index, text)| NormalizedIssue {
            id: issue_id(None, &domain.domain, index),
            source: domain.domain.clone(),
            source_type: SourceType::Domain,
            source_title: None,
            severity: Severity::Medium,
            dimension: classifier.classify(text).as_str().to_string(),
            description: text.clone(),
            recommendation: None,
            rule_id: None,
            rule_name: None,
        })
        .collect()
}

fn domain_issue(
    domain: &DomainAnalysis,
    index: usize,
    issue: &RawIssue,
    rule_id: Option<String>,
    rule_name: Option<String>,
    dimension: String,
) -> NormalizedIssue {
    NormalizedIssue {
        id: issue_id(rule_id.as_deref(), &domain.domain, index),
        source: domain.domain.clone(),
        source_type: SourceType::Domain,
        source_title: None,
        severity: issue.severity.clone(),
        dimension,
        description: issue.description.clone(),
        recommendation: issue.recommendation.clone(),
        rule_id,
        rule_name,
    }
}

/// `rule_id` when present, otherwise `"{source}#{index}"`.
fn issue_id(rule_id: Option<&str>, source: &str, index: usize) -> String {
    match rule_id {
        Some(id) => id.to_string(),
        None => format!("{}#{}", source, index),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RuleResult;

    fn raw(rule_id: Option<&str>, severity: Severity, description: &str) -> RawIssue {
        RawIssue {
            rule_id: rule_id.map(String::from),
            rule_name: None,
            severity,
            dimension: Some("technical".to_string()),
            description: description.to_string(),
            recommendation: None,
        }
    }

    fn page(url: &str, issues: Vec<RawIssue>) -> PageScore {
        PageScore {
            url: url.to_string(),
            title: Some(format!("Title of {}", url)),
            issues,
            ..PageScore::default()
        }
    }

    fn domain(name: &str, rules: Vec<RuleResult>, issues: &[&str]) -> DomainAnalysis {
        DomainAnalysis {
            domain: name.to_string(),
            rule_results: rules,
            issues: issues.iter().map(|s| s.to_string()).collect(),
            ..DomainAnalysis::default()
        }
    }

    fn rule(id: &str, category: &str, issues: Vec<RawIssue>) -> RuleResult {
        RuleResult {
            rule_id: id.to_string(),
            rule_name: format!("Rule {}", id),
            category: category.to_string(),
            issues,
            ..RuleResult::default()
        }
    }

    #[test]
    fn test_page_issue_fields() {
        let pages = vec![page(
            "https://a.test/",
            vec![raw(Some("meta-title"), Severity::High, "Missing title")],
        )];

        let issues = normalize(&pages, &[]);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.id, "meta-title");
        assert_eq!(issue.source, "https://a.test/");
        assert_eq!(issue.source_type, SourceType::Page);
        assert_eq!(issue.source_title.as_deref(), Some("Title of https://a.test/"));
        assert_eq!(issue.severity, Severity::High);
        assert_eq!(issue.dimension, "technical");
        assert_eq!(issue.rule_id.as_deref(), Some("meta-title"));
    }

    #[test]
    fn test_page_issue_defaults() {
        let mut issue = raw(None, Severity::Low, "Something");
        issue.dimension = None;
        let issues = normalize(&[page("https://a.test/x", vec![issue.clone(), issue])], &[]);

        assert_eq!(issues[0].dimension, GENERAL_DIMENSION);
        assert_eq!(issues[0].id, "https://a.test/x#0");
        assert_eq!(issues[1].id, "https://a.test/x#1");
        assert!(issues[0].rule_id.is_none());
    }

    #[test]
    fn test_rule_issues_take_precedence() {
        let d = domain(
            "a.test",
            vec![
                rule("no-rule-issues", "quality", vec![]),
                rule(
                    "backlinks",
                    "authority",
                    vec![raw(None, Severity::Critical, "Toxic backlinks")],
                ),
            ],
            &["Missing HTTPS certificate", "Thin content"],
        );

        let issues = normalize(&[], &[d]);
        assert_eq!(issues.len(), 1);
        let issue = &issues[0];
        assert_eq!(issue.description, "Toxic backlinks");
        assert_eq!(issue.dimension, "authority");
        assert_eq!(issue.rule_id.as_deref(), Some("backlinks"));
        assert_eq!(issue.rule_name.as_deref(), Some("Rule backlinks"));
        assert_eq!(issue.source_type, SourceType::Domain);
        assert_eq!(issue.severity, Severity::Critical);
    }

    #[test]
    fn test_keyword_fallback_https() {
        let d = domain("a.test", vec![], &["Missing HTTPS certificate"]);

        let issues = normalize(&[], &[d]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].dimension, "technical");
        assert_eq!(issues[0].severity, Severity::Medium);
        assert_eq!(issues[0].id, "a.test#0");
        assert_eq!(issues[0].source, "a.test");
    }

    #[test]
    fn test_keyword_fallback_mobile() {
        let d = domain(
            "a.test",
            vec![rule("silent", "technical", vec![])],
            &["High bounce rate due to poor mobile optimization"],
        );

        let issues = normalize(&[], &[d]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].dimension, "technical");
        assert_eq!(issues[0].severity, Severity::Medium);
    }

    #[test]
    fn test_rule_category_fallbacks() {
        let mut with_dimension = raw(None, Severity::Low, "Has own dimension");
        with_dimension.dimension = Some("structure".to_string());
        let mut bare = raw(Some("issue-level-id"), Severity::Low, "Bare");
        bare.dimension = None;

        let d = domain("a.test", vec![rule("", "", vec![with_dimension, bare])], &[]);
        let issues = normalize(&[], &[d]);

        assert_eq!(issues[0].dimension, "structure");
        assert_eq!(issues[0].id, "a.test#0");
        assert_eq!(issues[1].dimension, GENERAL_DIMENSION);
        assert_eq!(issues[1].id, "issue-level-id");
    }

    #[test]
    fn test_unknown_severity_passes_through() {
        let pages = vec![page(
            "https://a.test/",
            vec![raw(None, Severity::from("Blocker"), "Odd")],
        )];
        let issues = normalize(&pages, &[]);
        assert_eq!(issues[0].severity, Severity::Other("Blocker".to_string()));
    }

    #[test]
    fn test_pages_before_domains() {
        let pages = vec![page(
            "https://a.test/",
            vec![raw(None, Severity::Low, "Page issue")],
        )];
        let domains = vec![domain("a.test", vec![], &["Domain issue"])];

        let issues = normalize(&pages, &domains);
        assert_eq!(issues[0].source_type, SourceType::Page);
        assert_eq!(issues[1].source_type, SourceType::Domain);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize(&[], &[]).is_empty());
        assert!(normalize(&[page("https://a.test/", vec![])], &[domain("a.test", vec![], &[])])
            .is_empty());
    }
}
