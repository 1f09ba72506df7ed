// Configuration for a group-comparison analysis run
//
// Defaults describe the alcoholism EEG dataset: one row per sample with the
// subject group in "subject identifier" ("a" alcoholic, "c" control).

use crate::region::{RegionPreset, RegionRule, RegionRules};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Names of the input columns the analysis reads
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    /// Numeric measurement
    pub value: String,

    /// Subject group label
    pub group: String,

    /// Sensor position identifier (e.g. "CP1")
    pub position: String,

    /// Experimental condition label
    pub condition: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            value: "sensor value".to_string(),
            group: "subject identifier".to_string(),
            position: "sensor position".to_string(),
            condition: "matching condition".to_string(),
        }
    }
}

/// Settings for one analysis run
///
/// # Example
/// ```
/// use eegcompare::analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.significance_level, 0.05);
/// assert_eq!(config.group1, "a");
/// ```
///
/// # Example TOML
/// ```toml
/// group1 = "a"
/// group2 = "c"
/// excluded_positions = ["X", "Y", "nd"]
/// significance_level = 0.01
/// region_preset = "frontal-first"
///
/// [columns]
/// value = "sensor value"
///
/// [[region_rule]]
/// prefixes = ["F", "AF"]
/// region = "Frontal Lobe"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub columns: ColumnNames,

    /// First group label (e.g. alcoholic)
    pub group1: String,

    /// Second group label (e.g. control)
    pub group2: String,

    /// Sensor positions left out of significance testing
    pub excluded_positions: Vec<String>,

    /// Significance level (alpha) for the per-position t-tests
    pub significance_level: f64,

    /// How many positions the difference ranking shows
    pub top_n: usize,

    /// Where the cleaned table is written
    pub cleaned_output: PathBuf,

    /// Built-in rule table used when `region_rule` is empty
    pub region_preset: RegionPreset,

    /// Custom region rule table; overrides `region_preset` when not empty
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub region_rule: Vec<RegionRule>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            group1: "a".to_string(),
            group2: "c".to_string(),
            excluded_positions: vec!["x".to_string(), "y".to_string(), "nd".to_string()],
            significance_level: 0.05,
            top_n: 10,
            cleaned_output: PathBuf::from("cleaned_data.csv"),
            region_preset: RegionPreset::Standard,
            region_rule: Vec::new(),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from TOML text; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).context("Failed to parse TOML analysis configuration")?;
        config.validate().map_err(|e| anyhow::anyhow!(e))?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file: {}", path.as_ref().display())
        })?;
        Self::from_toml_str(&content)
    }

    /// Region rule table for this run
    pub fn region_rules(&self) -> Result<RegionRules> {
        if self.region_rule.is_empty() {
            Ok(self.region_preset.rules())
        } else {
            RegionRules::from_rules(self.region_rule.clone())
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(format!(
                "significance_level must be in (0, 1), got {}",
                self.significance_level
            ));
        }

        if self.group1.is_empty() || self.group2.is_empty() {
            return Err("group labels must not be empty".to_string());
        }

        if self.group1 == self.group2 {
            return Err(format!(
                "group1 and group2 must differ, both are '{}'",
                self.group1
            ));
        }

        let columns = [
            ("value", &self.columns.value),
            ("group", &self.columns.group),
            ("position", &self.columns.position),
            ("condition", &self.columns.condition),
        ];
        if let Some((name, _)) = columns.iter().find(|(_, col)| col.is_empty()) {
            return Err(format!("column name for '{}' must not be empty", name));
        }

        if self.top_n == 0 {
            return Err("top_n must be >= 1".to_string());
        }

        Ok(())
    }
}
