//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.visiscore.toml` files.

use crate::analysis::{default_keyword_rules, AggregatorConfig, KeywordClassifier, KeywordRule};
use crate::cli::OutputFormat;
use crate::error::ConfigError;
use crate::models::{Dimension, Severity};
use crate::scoring::{ScoreWeights, DEFAULT_PAGE_WEIGHT};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".visiscore.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Score weighting.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Free-text issue classification.
    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Colours shared by every view.
    #[serde(default)]
    pub presentation: PresentationConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Score weighting settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Fraction of the combined score attributed to page analysis.
    #[serde(default = "default_page_weight")]
    pub page_weight: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            page_weight: default_page_weight(),
        }
    }
}

fn default_page_weight() -> f64 {
    DEFAULT_PAGE_WEIGHT
}

/// Keyword classifier settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Dimension for text no rule matches.
    #[serde(default = "default_dimension")]
    pub default_dimension: Dimension,

    /// Ordered rules; the first match wins.
    #[serde(default = "default_keyword_rules")]
    pub rules: Vec<KeywordRule>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            default_dimension: default_dimension(),
            rules: default_keyword_rules(),
        }
    }
}

fn default_dimension() -> Dimension {
    Dimension::Authority
}

impl ClassifierConfig {
    /// Build the classifier described by this section.
    pub fn to_classifier(&self) -> KeywordClassifier {
        KeywordClassifier::new(self.rules.clone(), self.default_dimension)
    }
}

/// Colour palette, one entry per dimension and severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub technical_color: String,
    pub structure_color: String,
    pub authority_color: String,
    pub quality_color: String,
    pub critical_color: String,
    pub high_color: String,
    pub medium_color: String,
    pub low_color: String,
    /// Used for unrecognised severities.
    pub other_color: String,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            technical_color: "#3b82f6".to_string(),
            structure_color: "#8b5cf6".to_string(),
            authority_color: "#10b981".to_string(),
            quality_color: "#f59e0b".to_string(),
            critical_color: "#dc2626".to_string(),
            high_color: "#ea580c".to_string(),
            medium_color: "#ca8a04".to_string(),
            low_color: "#16a34a".to_string(),
            other_color: "#6b7280".to_string(),
        }
    }
}

impl PresentationConfig {
    /// Colour for a dimension.
    pub fn dimension_color(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::Technical => &self.technical_color,
            Dimension::Structure => &self.structure_color,
            Dimension::Authority => &self.authority_color,
            Dimension::Quality => &self.quality_color,
        }
    }

    /// Colour for a free-form dimension label, if it names a known dimension.
    pub fn dimension_label_color(&self, label: &str) -> Option<&str> {
        Dimension::parse(label).map(|d| self.dimension_color(d))
    }

    /// Colour for a severity.
    pub fn severity_color(&self, severity: &Severity) -> &str {
        match severity {
            Severity::Critical => &self.critical_color,
            Severity::High => &self.high_color,
            Severity::Medium => &self.medium_color,
            Severity::Low => &self.low_color,
            Severity::Other(_) => &self.other_color,
        }
    }

    fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("technical_color", self.technical_color.as_str()),
            ("structure_color", self.structure_color.as_str()),
            ("authority_color", self.authority_color.as_str()),
            ("quality_color", self.quality_color.as_str()),
            ("critical_color", self.critical_color.as_str()),
            ("high_color", self.high_color.as_str()),
            ("medium_color", self.medium_color.as_str()),
            ("low_color", self.low_color.as_str()),
            ("other_color", self.other_color.as_str()),
        ]
    }
}

/// Report generation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format when --format is not given.
    #[serde(default)]
    pub format: OutputFormat,

    /// Affected sources listed per issue in Markdown before eliding.
    #[serde(default = "default_max_sources")]
    pub max_sources: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            max_sources: default_max_sources(),
        }
    }
}

fn default_max_sources() -> usize {
    10
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.visiscore.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(DEFAULT_CONFIG_FILE);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Check values the engine cannot use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let weight = self.scoring.page_weight;
        if !(0.0..=1.0).contains(&weight) {
            return Err(ConfigError::InvalidPageWeight(weight));
        }

        for (index, rule) in self.classifier.rules.iter().enumerate() {
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(ConfigError::EmptyKeywordRule { index });
            }
        }

        for (key, value) in self.presentation.entries() {
            if !is_hex_color(value) {
                return Err(ConfigError::InvalidColor {
                    key: key.to_string(),
                    value: value.to_string(),
                });
            }
        }

        if self.report.max_sources == 0 {
            return Err(ConfigError::ZeroMaxSources);
        }

        Ok(())
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when explicitly provided.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(weight) = args.page_weight {
            self.scoring.page_weight = weight;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
    }

    /// The engine policy described by this configuration.
    pub fn aggregator_config(&self) -> AggregatorConfig {
        AggregatorConfig {
            weights: ScoreWeights::new(self.scoring.page_weight),
            classifier: self.classifier.to_classifier(),
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}

fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}
