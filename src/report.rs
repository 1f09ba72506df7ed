//! Full analysis run and its text rendering
//!
//! [`run`] drives the pipeline end to end: ingest, clean, persist, then the
//! comparison, significance, condition and region stages. The resulting
//! [`AnalysisReport`] is what the CSV and JSON renderers consume too.

use crate::analysis::{
    aggregate_by_condition, compare_groups, region_group_means, test_significance_with_rules,
    AnalysisConfig, ConditionGroupStats, GroupComparison, RegionGroupMean, SignificantSensors,
};
use crate::ingest::{self, IngestSummary};
use crate::region::{annotate_regions, RegionRules, REGION_COLUMN};
use crate::table::Table;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Everything one analysis run produced
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub data_dir: PathBuf,
    pub ingest: IngestSummary,

    /// Rows left after cleaning
    pub rows_analyzed: usize,

    /// Value cells that did not parse as numbers
    pub non_numeric_values: usize,

    /// Where the cleaned table was written, if it was
    pub cleaned_output: Option<PathBuf>,

    pub top_n: usize,
    pub comparison: GroupComparison,
    pub significance: SignificantSensors,
    pub condition_stats: Vec<ConditionGroupStats>,
    pub region_means: Vec<RegionGroupMean>,
}

/// Load every CSV below `data_dir` and run the whole analysis
///
/// # Errors
/// Fails when the directory is missing, nothing could be ingested, a
/// configured column is absent, or the cleaned table cannot be written.
pub fn run(data_dir: &Path, config: &AnalysisConfig, rules: &RegionRules) -> Result<AnalysisReport> {
    let (mut table, summary) = ingest::load_directory(data_dir)?;
    if table.is_empty() {
        anyhow::bail!(
            "No rows ingested from {} ({} CSV files found)",
            data_dir.display(),
            summary.files_found
        );
    }

    let non_numeric = table
        .coerce_numeric(&config.columns.value)
        .context("Cannot coerce the value column")?;
    if non_numeric > 0 {
        tracing::warn!(
            "{} values in '{}' are not numeric and were set to missing",
            non_numeric,
            config.columns.value
        );
    }

    ingest::write_csv(&table, &config.cleaned_output)?;

    let mut report = analyze(&table, config, rules)?;
    report.data_dir = data_dir.to_path_buf();
    report.ingest = summary;
    report.non_numeric_values = non_numeric;
    report.cleaned_output = Some(config.cleaned_output.clone());
    Ok(report)
}

/// Run the analysis stages on an already cleaned table
pub fn analyze(table: &Table, config: &AnalysisConfig, rules: &RegionRules) -> Result<AnalysisReport> {
    let cols = &config.columns;

    let significance = test_significance_with_rules(
        table,
        &cols.value,
        &cols.group,
        &cols.position,
        &config.group1,
        &config.group2,
        &config.excluded_positions,
        config.significance_level,
        rules,
    )
    .context("Significance testing failed")?;

    let comparison = compare_groups(
        table,
        &cols.value,
        &cols.group,
        &cols.position,
        &config.group1,
        &config.group2,
    )
    .context("Group comparison failed")?;

    let missing = comparison.positions_missing_a_group();
    if !missing.is_empty() {
        tracing::warn!(
            "Positions without data for one group (mean reported as 0): {}",
            missing.join(", ")
        );
    }

    let condition_stats = aggregate_by_condition(table, &cols.value, &cols.condition, &cols.group)
        .context("Condition aggregation failed")?;

    let annotated =
        annotate_regions(table, &cols.position, rules).context("Region annotation failed")?;
    let region_means = region_group_means(&annotated, REGION_COLUMN, &cols.group, &cols.value)
        .context("Region aggregation failed")?;

    Ok(AnalysisReport {
        data_dir: PathBuf::new(),
        ingest: IngestSummary::default(),
        rows_analyzed: table.len(),
        non_numeric_values: 0,
        cleaned_output: None,
        top_n: config.top_n,
        comparison,
        significance,
        condition_stats,
        region_means,
    })
}

fn fmt_opt(value: Option<f32>) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.4}", v))
}

impl AnalysisReport {
    /// Human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();
        let group1 = &self.comparison.group1;
        let group2 = &self.comparison.group2;

        report.push_str("=== EEG Group Comparison ===\n");
        if !self.data_dir.as_os_str().is_empty() {
            report.push_str(&format!("Data directory: {}\n", self.data_dir.display()));
        }
        report.push_str(&format!(
            "Files: {} found, {} loaded, {} skipped\n",
            self.ingest.files_found,
            self.ingest.files_loaded,
            self.ingest.files_skipped.len()
        ));
        for (path, reason) in &self.ingest.files_skipped {
            report.push_str(&format!("  skipped {}: {}\n", path.display(), reason));
        }
        report.push_str(&format!(
            "Rows: {} analyzed ({} duplicates, {} incomplete dropped, {} non-numeric values)\n",
            self.rows_analyzed,
            self.ingest.duplicates_dropped,
            self.ingest.incomplete_dropped,
            self.non_numeric_values
        ));
        if let Some(path) = &self.cleaned_output {
            report.push_str(&format!("Cleaned data: {}\n", path.display()));
        }
        report.push('\n');

        let top = self.comparison.top(self.top_n);
        report.push_str(&format!(
            "Top {} Sensor Positions with Most Pronounced Differences\n",
            top.len()
        ));
        report.push_str(&format!(
            "{:<10} {:>12} {:>12} {:>12}\n",
            "position",
            format!("{} mean", group1),
            format!("{} mean", group2),
            "difference"
        ));
        for row in top {
            let marker = if row.missing_group() { " *" } else { "" };
            report.push_str(&format!(
                "{:<10} {:>12.4} {:>12.4} {:>12.4}{}\n",
                row.position, row.group1_mean, row.group2_mean, row.difference, marker
            ));
        }
        if top.iter().any(|row| row.missing_group()) {
            report.push_str("* one group has no numeric data at this position (mean shown as 0)\n");
        }
        report.push('\n');

        report.push_str(&self.significance.to_report_string());
        for detail in &self.significance.details {
            report.push_str(&format!(
                "  {:<6} t = {:>8.4}  p = {:.6}  df = {:.2}\n",
                detail.position, detail.test.statistic, detail.test.pvalue, detail.test.df
            ));
        }
        report.push('\n');

        report.push_str("Mean and standard deviation by condition and group\n");
        report.push_str(&format!(
            "{:<24} {:<8} {:>6} {:>12} {:>12}\n",
            "condition", "group", "n", "mean", "std"
        ));
        for stats in &self.condition_stats {
            report.push_str(&format!(
                "{:<24} {:<8} {:>6} {:>12} {:>12}\n",
                stats.condition,
                stats.group,
                stats.count,
                fmt_opt(stats.mean),
                fmt_opt(stats.std)
            ));
        }
        report.push('\n');

        report.push_str("Mean absolute value by brain region and group\n");
        report.push_str(&format!("{:<28} {:<8} {:>12}\n", "region", "group", "|mean|"));
        for m in &self.region_means {
            report.push_str(&format!(
                "{:<28} {:<8} {:>12.4}\n",
                m.region, m.group, m.abs_mean
            ));
        }

        report
    }
}
