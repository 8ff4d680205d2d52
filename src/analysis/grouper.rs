//! Issue grouping and ranking.
//!
//! Groups normalized issues by rule identity, collects the sources each
//! one was seen on, and orders the groups by severity.

use crate::models::{AffectedSource, GroupedIssue, NormalizedIssue, Severity};
use std::collections::HashMap;

/// Grouping key for an issue.
///
/// Prefers `rule_id`, then `id`. Issues with neither fall back to
/// description plus severity, which can merge unrelated issues that
/// happen to share text.
pub fn issue_key(issue: &NormalizedIssue) -> String {
    if let Some(rule_id) = issue.rule_id.as_deref().filter(|r| !r.is_empty()) {
        return rule_id.to_string();
    }
    if !issue.id.is_empty() {
        return issue.id.clone();
    }
    format!("{}::{}", issue.description, issue.severity.as_str())
}

/// Group issues by key, in first-seen order.
///
/// The first issue seen for a key becomes the representative; later
/// duplicates only add to `affected_sources`.
pub fn group(issues: &[NormalizedIssue]) -> Vec<GroupedIssue> {
    let mut groups: Vec<GroupedIssue> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for issue in issues {
        let key = issue_key(issue);
        match positions.get(&key) {
            Some(&pos) => groups[pos].affected_sources.push(AffectedSource::from(issue)),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(GroupedIssue {
                    issue_key: key,
                    representative_issue: issue.clone(),
                    dimension: issue.dimension.clone(),
                    affected_sources: vec![AffectedSource::from(issue)],
                });
            }
        }
    }

    groups
}

/// Sort groups by severity, critical first. Equal severities keep their
/// relative order.
pub fn sort(mut groups: Vec<GroupedIssue>) -> Vec<GroupedIssue> {
    groups.sort_by_key(|g| g.severity().rank());
    groups
}

/// Group then sort.
pub fn group_and_sort(issues: &[NormalizedIssue]) -> Vec<GroupedIssue> {
    sort(group(issues))
}

/// Keep only groups at or above `min` severity.
pub fn filter_min_severity(groups: Vec<GroupedIssue>, min: &Severity) -> Vec<GroupedIssue> {
    groups
        .into_iter()
        .filter(|g| g.severity().at_least(min))
        .collect()
}

/// Get the top N groups by severity.
pub fn top_groups(groups: &[GroupedIssue], n: usize) -> Vec<GroupedIssue> {
    let mut sorted = sort(groups.to_vec());
    sorted.truncate(n);
    sorted
}
