// Per-position group comparison
//
// Mean value of each group at each sensor position, ranked by the absolute
// difference between the two group means.

use crate::analysis::statistics::mean;
use crate::table::{Result, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Group means at one sensor position
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PositionDifference {
    pub position: String,

    /// Mean of group 1 here, 0 when the group has no numeric values at this
    /// position (absent, or every value failed to parse)
    pub group1_mean: f32,

    /// Mean of group 2 here, 0 when the group has no numeric values at this
    /// position (absent, or every value failed to parse)
    pub group2_mean: f32,

    /// Numeric observations behind `group1_mean`
    pub group1_count: usize,

    /// Numeric observations behind `group2_mean`
    pub group2_count: usize,

    /// `|group1_mean - group2_mean|`
    pub difference: f32,
}

impl PositionDifference {
    /// True when one side's mean is the zero default rather than data
    pub fn missing_group(&self) -> bool {
        self.group1_count == 0 || self.group2_count == 0
    }

    /// `group1_mean - group2_mean`
    pub fn signed_difference(&self) -> f32 {
        self.group1_mean - self.group2_mean
    }
}

/// Group comparison result, sorted by descending difference
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupComparison {
    pub group1: String,
    pub group2: String,
    rows: Vec<PositionDifference>,
}

impl GroupComparison {
    pub fn rows(&self) -> &[PositionDifference] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The `n` positions with the largest difference
    pub fn top(&self, n: usize) -> &[PositionDifference] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn get(&self, position: &str) -> Option<&PositionDifference> {
        self.rows.iter().find(|row| row.position == position)
    }

    /// Signed differences in position order, one per position
    pub fn signed_differences(&self) -> Vec<(String, f32)> {
        let mut out: Vec<(String, f32)> = self
            .rows
            .iter()
            .map(|row| (row.position.clone(), row.signed_difference()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }

    /// Positions where one group's mean is the zero default
    pub fn positions_missing_a_group(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter(|row| row.missing_group())
            .map(|row| row.position.as_str())
            .collect()
    }
}

/// Compare the mean `value_col` of two groups at every sensor position
///
/// Positions are enumerated in sorted order and then stably sorted by
/// descending difference, so ties keep that order. A group that never shows
/// up at a position, or whose values there are all non-numeric, gets mean 0.
///
/// # Errors
/// `TableError::MissingColumn` if any of the three columns is absent.
///
/// # Example
/// ```
/// use eegcompare::analysis::compare_groups;
/// use eegcompare::table::Table;
///
/// let table = Table::from_columns(&[
///     ("sensor position", vec!["CP1", "CP1", "P3", "P3"]),
///     ("subject identifier", vec!["a", "c", "a", "c"]),
///     ("sensor value", vec!["4.0", "1.0", "2.0", "2.5"]),
/// ])
/// .unwrap();
///
/// let result = compare_groups(
///     &table, "sensor value", "subject identifier", "sensor position", "a", "c",
/// )
/// .unwrap();
/// assert_eq!(result.rows()[0].position, "CP1");
/// assert_eq!(result.rows()[0].difference, 3.0);
/// ```
pub fn compare_groups(
    table: &Table,
    value_col: &str,
    group_col: &str,
    position_col: &str,
    group1: &str,
    group2: &str,
) -> Result<GroupComparison> {
    let value_idx = table.column_index(value_col)?;
    let group_idx = table.column_index(group_col)?;
    let position_idx = table.column_index(position_col)?;

    let mut samples: BTreeMap<String, (Vec<f32>, Vec<f32>)> = BTreeMap::new();

    for row in table.rows() {
        let Some(position) = row[position_idx].as_text() else {
            continue;
        };
        let entry = samples.entry(position).or_default();

        let Some(value) = row[value_idx].as_number() else {
            continue;
        };
        match row[group_idx].as_text().as_deref() {
            Some(g) if g == group1 => entry.0.push(value),
            Some(g) if g == group2 => entry.1.push(value),
            _ => {}
        }
    }

    let mut rows: Vec<PositionDifference> = samples
        .into_iter()
        .map(|(position, (values1, values2))| {
            let group1_mean = mean(&values1).unwrap_or(0.0);
            let group2_mean = mean(&values2).unwrap_or(0.0);
            PositionDifference {
                position,
                group1_mean,
                group2_mean,
                group1_count: values1.len(),
                group2_count: values2.len(),
                difference: (group1_mean - group2_mean).abs(),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.difference.total_cmp(&a.difference));

    tracing::debug!(
        "Compared '{}' vs '{}' at {} sensor positions",
        group1,
        group2,
        rows.len()
    );

    Ok(GroupComparison {
        group1: group1.to_string(),
        group2: group2.to_string(),
        rows,
    })
}
