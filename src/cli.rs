//! CLI argument parsing for eegcompare

use crate::analysis::AnalysisConfig;
use crate::region::RegionPreset;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the analysis report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
    /// CSV format for spreadsheet analysis
    Csv,
}

#[derive(Parser, Debug)]
#[command(name = "eegcompare")]
#[command(version)]
#[command(about = "Compare EEG sensor responses between two subject groups", long_about = None)]
pub struct Cli {
    /// Directory searched recursively for *.csv recordings
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// TOML analysis configuration
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write the cleaned, concatenated table
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Number of positions in the difference ranking
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Significance level for the per-position t-tests
    #[arg(long = "alpha", value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// First group label
    #[arg(long = "group1", value_name = "LABEL")]
    pub group1: Option<String>,

    /// Second group label
    #[arg(long = "group2", value_name = "LABEL")]
    pub group2: Option<String>,

    /// Built-in region rule table
    #[arg(long = "region-preset", value_enum, value_name = "PRESET")]
    pub region_preset: Option<RegionPreset>,

    /// TOML file with a custom [[region_rule]] table (takes precedence)
    #[arg(long = "region-rules", value_name = "FILE")]
    pub region_rules: Option<PathBuf>,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug")]
    pub debug: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut AnalysisConfig) {
        if let Some(output) = &self.output {
            config.cleaned_output = output.clone();
        }
        if let Some(top) = self.top {
            config.top_n = top;
        }
        if let Some(alpha) = self.alpha {
            config.significance_level = alpha;
        }
        if let Some(group1) = &self.group1 {
            config.group1 = group1.clone();
        }
        if let Some(group2) = &self.group2 {
            config.group2 = group2.clone();
        }
        if let Some(preset) = self.region_preset {
            config.region_preset = preset;
        }
    }
}
