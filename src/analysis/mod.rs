//! Issue analysis.
//!
//! Normalization and grouping of rule issues, plus the [`Aggregator`]
//! that runs the whole pipeline alongside score combination.

pub mod aggregator;
pub mod classifier;
pub mod grouper;
pub mod normalizer;

pub use aggregator::*;
pub use classifier::{default_keyword_rules, KeywordClassifier, KeywordRule};
pub use grouper::{filter_min_severity, group, group_and_sort, issue_key, sort, top_groups};
pub use normalizer::{normalize, normalize_with, GENERAL_DIMENSION};
