// Per-position significance testing between two subject groups
//
// For every sensor position the values of the two groups are compared with
// Welch's t-test. Positions below the significance level are grouped by the
// brain region their sensor name maps to.

use crate::analysis::statistics::{welch_t_test, WelchTest};
use crate::region::{RegionRules, UNKNOWN_REGION};
use crate::table::{Result, Table};
use serde::Serialize;
use std::collections::HashMap;

/// A position whose group difference reached significance
#[derive(Debug, Clone, Serialize)]
pub struct SignificantPosition {
    pub position: String,
    pub region: String,
    pub test: WelchTest,
}

/// Significant positions grouped by region
///
/// Regions appear in the order they first received a significant position;
/// positions within a region keep the order they were tested in.
#[derive(Debug, Clone, Serialize)]
pub struct SignificantSensors {
    /// Significance level used
    pub alpha: f64,

    regions: Vec<(String, Vec<String>)>,

    /// Test details for every significant position, in test order
    pub details: Vec<SignificantPosition>,

    /// Positions that were tested (enough data on both sides)
    pub tested: usize,

    /// Positions skipped for lack of data or an undefined test
    pub insufficient: Vec<String>,
}

impl SignificantSensors {
    fn new(alpha: f64) -> Self {
        Self {
            alpha,
            regions: Vec::new(),
            details: Vec::new(),
            tested: 0,
            insufficient: Vec::new(),
        }
    }

    fn record(&mut self, position: &str, region: &str, test: WelchTest) {
        match self.regions.iter().position(|(r, _)| r == region) {
            Some(i) => self.regions[i].1.push(position.to_string()),
            None => self
                .regions
                .push((region.to_string(), vec![position.to_string()])),
        }
        self.details.push(SignificantPosition {
            position: position.to_string(),
            region: region.to_string(),
            test,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// (region, positions) pairs in first-seen order
    pub fn regions(&self) -> &[(String, Vec<String>)] {
        &self.regions
    }

    pub fn positions_for(&self, region: &str) -> Option<&[String]> {
        self.regions
            .iter()
            .find(|(r, _)| r == region)
            .map(|(_, positions)| positions.as_slice())
    }

    pub fn contains_position(&self, position: &str) -> bool {
        self.regions
            .iter()
            .any(|(_, positions)| positions.iter().any(|p| p == position))
    }

    /// Human-readable summary
    pub fn to_report_string(&self) -> String {
        if self.regions.is_empty() {
            return "No sensor positions showed statistically significant differences.\n"
                .to_string();
        }

        let mut report = format!(
            "The following regions have shown a significant difference (p < {}):\n",
            self.alpha
        );
        for (region, positions) in &self.regions {
            report.push_str(&format!("{}: {}\n", region, positions.join(", ")));
        }
        report
    }
}

/// Welch t-test per sensor position with the standard region table
///
/// See [`test_significance_with_rules`].
#[allow(clippy::too_many_arguments)]
pub fn test_significance(
    table: &Table,
    value_col: &str,
    group_col: &str,
    position_col: &str,
    group1: &str,
    group2: &str,
    excluded_positions: &[String],
    alpha: f64,
) -> Result<SignificantSensors> {
    test_significance_with_rules(
        table,
        value_col,
        group_col,
        position_col,
        group1,
        group2,
        excluded_positions,
        alpha,
        &RegionRules::standard(),
    )
}

/// Welch t-test per sensor position, reporting positions with p < `alpha`
/// grouped by region
///
/// Positions are visited in first-appearance order. A position is skipped
/// when it is listed in `excluded_positions` or `rules` cannot place it.
/// Missing values are left out of the samples; a position with fewer than
/// two values on either side, or whose test is undefined, is not significant.
///
/// # Errors
/// `TableError::MissingColumn` if any of the three columns is absent.
#[allow(clippy::too_many_arguments)]
pub fn test_significance_with_rules(
    table: &Table,
    value_col: &str,
    group_col: &str,
    position_col: &str,
    group1: &str,
    group2: &str,
    excluded_positions: &[String],
    alpha: f64,
    rules: &RegionRules,
) -> Result<SignificantSensors> {
    let value_idx = table.column_index(value_col)?;
    let group_idx = table.column_index(group_col)?;
    let position_idx = table.column_index(position_col)?;

    // Distinct positions in first-appearance order, each with its two samples
    let mut order: Vec<String> = Vec::new();
    let mut samples: Vec<(Vec<f32>, Vec<f32>)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for row in table.rows() {
        let Some(position) = row[position_idx].as_text() else {
            continue;
        };
        let slot = *slots.entry(position.clone()).or_insert_with(|| {
            order.push(position);
            samples.push((Vec::new(), Vec::new()));
            order.len() - 1
        });

        let Some(value) = row[value_idx].as_number() else {
            continue;
        };
        match row[group_idx].as_text().as_deref() {
            Some(g) if g == group1 => samples[slot].0.push(value),
            Some(g) if g == group2 => samples[slot].1.push(value),
            _ => {}
        }
    }

    let mut result = SignificantSensors::new(alpha);

    for (position, (values1, values2)) in order.iter().zip(samples) {
        if excluded_positions.iter().any(|p| p == position) {
            tracing::debug!("Skipping excluded position {}", position);
            continue;
        }

        let region = rules.classify(position);
        if region == UNKNOWN_REGION {
            tracing::debug!("Skipping position {} with no known region", position);
            continue;
        }

        if values1.len() < 2 || values2.len() < 2 {
            tracing::debug!(
                "Not enough samples at {} ({} vs {})",
                position,
                values1.len(),
                values2.len()
            );
            result.insufficient.push(position.clone());
            continue;
        }

        match welch_t_test(&values1, &values2) {
            Ok(test) => {
                result.tested += 1;
                if test.is_significant(alpha) {
                    result.record(position, region, test);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to test position {}: {}", position, e);
                result.insufficient.push(position.clone());
            }
        }
    }

    tracing::info!(
        "Tested {} positions, {} significant at alpha={}",
        result.tested,
        result.details.len(),
        alpha
    );

    Ok(result)
}
