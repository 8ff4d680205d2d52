//! Visiscore - score combination and issue aggregation for page and
//! domain visibility analyses.
//!
//! The engine ([`scoring`], [`analysis`]) is pure: it takes already
//! computed rule evaluations and returns the combined score and the
//! grouped, severity-ranked issue list every dashboard view renders.
//! [`loader`], [`config`], [`report`] and [`cli`] make up the host around it.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod scoring;

pub use analysis::{Aggregate, Aggregator, AggregatorConfig};
pub use error::ConfigError;
pub use scoring::{combine, combine_with, ScoreWeights};
