//! Error types.
//!
//! The aggregation engine itself never fails; these cover configuration
//! that would make it produce meaningless numbers.

use thiserror::Error;

/// Invalid configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Page weight outside `[0, 1]`.
    #[error("page_weight must be between 0.0 and 1.0, got {0}")]
    InvalidPageWeight(f64),

    /// A classifier rule with no usable keyword.
    #[error("classifier rule #{index} has no keywords")]
    EmptyKeywordRule { index: usize },

    /// A palette entry that is not a `#rrggbb` colour.
    #[error("invalid colour for {key}: {value:?} (expected #rrggbb)")]
    InvalidColor { key: String, value: String },

    /// Markdown source limit of zero.
    #[error("report.max_sources must be at least 1")]
    ZeroMaxSources,
}
