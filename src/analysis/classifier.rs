//! Keyword-based dimension inference for free-text issues.
//!
//! The policy is an ordered table of `(keywords, dimension)` rules; the
//! first rule with a keyword contained in the text wins.

use crate::models::Dimension;
use serde::{Deserialize, Serialize};

/// A set of keywords that maps matching text to a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub dimension: Dimension,
}

impl KeywordRule {
    /// Creates a rule from static keywords.
    pub fn new(keywords: &[&str], dimension: Dimension) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            dimension,
        }
    }

    /// Case-insensitive substring match against already-lowercased text.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords
            .iter()
            .any(|k| !k.is_empty() && lowered.contains(&k.to_lowercase()))
    }
}

/// The built-in rule table, in precedence order.
pub fn default_keyword_rules() -> Vec<KeywordRule> {
    vec![
        KeywordRule::new(&["technical", "mobile", "https"], Dimension::Technical),
        KeywordRule::new(&["structure", "content"], Dimension::Structure),
        KeywordRule::new(&["monitoring", "kpi", "quality"], Dimension::Quality),
    ]
}

/// Ordered first-match-wins classifier with a fallback dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordClassifier {
    pub rules: Vec<KeywordRule>,
    pub default_dimension: Dimension,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self {
            rules: default_keyword_rules(),
            default_dimension: Dimension::Authority,
        }
    }
}

impl KeywordClassifier {
    /// Creates a classifier from an explicit table.
    pub fn new(rules: Vec<KeywordRule>, default_dimension: Dimension) -> Self {
        Self {
            rules,
            default_dimension,
        }
    }

    /// Infer the dimension of a free-text issue.
    pub fn classify(&self, text: &str) -> Dimension {
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.dimension)
            .unwrap_or(self.default_dimension)
    }
}
