//! Score combination.
//!
//! Blends page-level and domain-level scores into the headline numbers
//! and per-dimension values shown on summary cards and charts.

pub mod combiner;

pub use combiner::*;
