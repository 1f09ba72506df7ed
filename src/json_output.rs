//! JSON output format for analysis results

use crate::analysis::{ConditionGroupStats, PositionDifference, RegionGroupMean, SignificantPosition};
use crate::report::AnalysisReport;
use serde::{Deserialize, Serialize};

/// Ingestion counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonIngest {
    pub data_dir: String,
    pub files_found: usize,
    pub files_loaded: usize,
    /// Skipped files as "path: reason"
    pub files_skipped: Vec<String>,
    pub rows_read: usize,
    pub duplicates_dropped: usize,
    pub incomplete_dropped: usize,
    pub non_numeric_values: usize,
    pub rows_analyzed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cleaned_output: Option<String>,
}

/// Significant positions of one region
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRegion {
    pub region: String,
    pub positions: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonSignificance {
    pub alpha: f64,
    pub tested: usize,
    pub insufficient: Vec<String>,
    pub regions: Vec<JsonRegion>,
    pub details: Vec<SignificantPosition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonComparison {
    pub group1: String,
    pub group2: String,
    pub top: Vec<PositionDifference>,
}

/// Complete JSON document
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    pub format: String,
    pub version: String,
    pub ingest: JsonIngest,
    pub comparison: JsonComparison,
    pub significance: JsonSignificance,
    pub condition_stats: Vec<ConditionGroupStats>,
    pub region_means: Vec<RegionGroupMean>,
}

impl JsonReport {
    pub fn from_report(report: &AnalysisReport) -> Self {
        let ingest = JsonIngest {
            data_dir: report.data_dir.display().to_string(),
            files_found: report.ingest.files_found,
            files_loaded: report.ingest.files_loaded,
            files_skipped: report
                .ingest
                .files_skipped
                .iter()
                .map(|(path, reason)| format!("{}: {}", path.display(), reason))
                .collect(),
            rows_read: report.ingest.rows_read,
            duplicates_dropped: report.ingest.duplicates_dropped,
            incomplete_dropped: report.ingest.incomplete_dropped,
            non_numeric_values: report.non_numeric_values,
            rows_analyzed: report.rows_analyzed,
            cleaned_output: report
                .cleaned_output
                .as_ref()
                .map(|p| p.display().to_string()),
        };

        let significance = JsonSignificance {
            alpha: report.significance.alpha,
            tested: report.significance.tested,
            insufficient: report.significance.insufficient.clone(),
            regions: report
                .significance
                .regions()
                .iter()
                .map(|(region, positions)| JsonRegion {
                    region: region.clone(),
                    positions: positions.clone(),
                })
                .collect(),
            details: report.significance.details.clone(),
        };

        Self {
            format: "eegcompare-json-v1".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ingest,
            comparison: JsonComparison {
                group1: report.comparison.group1.clone(),
                group2: report.comparison.group2.clone(),
                top: report.comparison.top(report.top_n).to_vec(),
            },
            significance,
            condition_stats: report.condition_stats.clone(),
            region_means: report.region_means.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
