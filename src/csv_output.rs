//! CSV output format for analysis results
//!
//! Each result table becomes its own CSV block, introduced by a `# name`
//! line and separated by a blank line, so the whole report stays one file
//! that splits cleanly into spreadsheets.

use crate::analysis::{ConditionGroupStats, GroupComparison, RegionGroupMean, SignificantSensors};
use crate::report::AnalysisReport;
use anyhow::{Context, Result};

/// A single CSV table
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Generate CSV output as string, quoting through `csv::Writer`
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer
            .write_record(&self.headers)
            .context("Failed to write CSV header")?;
        for row in &self.rows {
            writer.write_record(row).context("Failed to write CSV row")?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV buffer: {}", e.error()))?;
        String::from_utf8(bytes).context("CSV output is not valid UTF-8")
    }
}

fn opt(value: Option<f32>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// The `top` largest differences
pub fn comparison_table(comparison: &GroupComparison, top: usize) -> CsvTable {
    let mut table = CsvTable::new(&[
        "position",
        "group1",
        "group2",
        "group1_mean",
        "group2_mean",
        "group1_count",
        "group2_count",
        "difference",
    ]);
    for row in comparison.top(top) {
        table.add_row(vec![
            row.position.clone(),
            comparison.group1.clone(),
            comparison.group2.clone(),
            row.group1_mean.to_string(),
            row.group2_mean.to_string(),
            row.group1_count.to_string(),
            row.group2_count.to_string(),
            row.difference.to_string(),
        ]);
    }
    table
}

/// One row per significant position
pub fn significance_table(significance: &SignificantSensors) -> CsvTable {
    let mut table = CsvTable::new(&[
        "region",
        "position",
        "t_statistic",
        "p_value",
        "df",
        "group1_mean",
        "group2_mean",
    ]);
    for detail in &significance.details {
        table.add_row(vec![
            detail.region.clone(),
            detail.position.clone(),
            detail.test.statistic.to_string(),
            detail.test.pvalue.to_string(),
            detail.test.df.to_string(),
            detail.test.group1_mean.to_string(),
            detail.test.group2_mean.to_string(),
        ]);
    }
    table
}

pub fn condition_table(stats: &[ConditionGroupStats]) -> CsvTable {
    let mut table = CsvTable::new(&["condition", "group", "count", "mean", "std"]);
    for s in stats {
        table.add_row(vec![
            s.condition.clone(),
            s.group.clone(),
            s.count.to_string(),
            opt(s.mean),
            opt(s.std),
        ]);
    }
    table
}

pub fn region_table(means: &[RegionGroupMean]) -> CsvTable {
    let mut table = CsvTable::new(&["region", "group", "abs_mean"]);
    for m in means {
        table.add_row(vec![
            m.region.clone(),
            m.group.clone(),
            m.abs_mean.to_string(),
        ]);
    }
    table
}

/// Whole report as sectioned CSV
pub fn report_to_csv(report: &AnalysisReport) -> Result<String> {
    let sections = [
        ("top_differences", comparison_table(&report.comparison, report.top_n)),
        ("significant_positions", significance_table(&report.significance)),
        ("condition_stats", condition_table(&report.condition_stats)),
        ("region_means", region_table(&report.region_means)),
    ];

    let mut blocks = Vec::with_capacity(sections.len());
    for (name, table) in &sections {
        blocks.push(format!("# {}\n{}", name, table.to_csv()?));
    }
    Ok(blocks.join("\n"))
}
