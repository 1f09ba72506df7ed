// Condition × group summary statistics

use crate::analysis::statistics::{mean, sample_std};
use crate::table::{Result, Table};
use serde::Serialize;
use std::collections::BTreeMap;

/// Mean and spread of the response for one (condition, group) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionGroupStats {
    pub condition: String,
    pub group: String,

    /// Numeric observations in this cell
    pub count: usize,

    /// `None` when the pair has no numeric observations
    pub mean: Option<f32>,

    /// Sample standard deviation (ddof = 1), `None` below two observations
    pub std: Option<f32>,
}

/// Mean and sample standard deviation of `value_col` for every
/// (condition, group) pair present in the table, ordered by condition then
/// group
///
/// Rows with a missing condition or group are ignored; missing values are
/// left out of the statistics but the pair still gets a row.
pub fn aggregate_by_condition(
    table: &Table,
    value_col: &str,
    condition_col: &str,
    group_col: &str,
) -> Result<Vec<ConditionGroupStats>> {
    let value_idx = table.column_index(value_col)?;
    let condition_idx = table.column_index(condition_col)?;
    let group_idx = table.column_index(group_col)?;

    let mut cells: BTreeMap<(String, String), Vec<f32>> = BTreeMap::new();

    for row in table.rows() {
        let (Some(condition), Some(group)) =
            (row[condition_idx].as_text(), row[group_idx].as_text())
        else {
            continue;
        };

        let values = cells.entry((condition, group)).or_default();
        if let Some(value) = row[value_idx].as_number() {
            values.push(value);
        }
    }

    Ok(cells
        .into_iter()
        .map(|((condition, group), values)| ConditionGroupStats {
            condition,
            group,
            count: values.len(),
            mean: mean(&values),
            std: sample_std(&values),
        })
        .collect())
}

/// Absolute mean response of one group within one brain region
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionGroupMean {
    pub region: String,
    pub group: String,
    pub abs_mean: f32,
}

/// Absolute mean of `value_col` per (region, group), ordered by region then
/// group
///
/// Feeds the region bar chart: one bar per group inside each region.
pub fn region_group_means(
    annotated: &Table,
    region_col: &str,
    group_col: &str,
    value_col: &str,
) -> Result<Vec<RegionGroupMean>> {
    let stats = aggregate_by_condition(annotated, value_col, region_col, group_col)?;
    Ok(stats
        .into_iter()
        .filter_map(|s| {
            s.mean.map(|m| RegionGroupMean {
                region: s.condition,
                group: s.group,
                abs_mean: m.abs(),
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_table() -> Table {
        Table::from_columns(&[
            (
                "subject_identifier",
                vec!["group1", "group1", "group1", "group2", "group2", "group2"],
            ),
            (
                "condition",
                vec!["condition1", "condition1", "condition2", "condition1", "condition2", "condition2"],
            ),
            ("value", vec!["1.2", "2.3", "1.4", "2.1", "0.9", "1.0"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_aggregate_reference_scenario() {
        let result =
            aggregate_by_condition(&reference_table(), "value", "condition", "subject_identifier")
                .unwrap();

        assert_eq!(result.len(), 4);

        let c1g1 = &result[0];
        assert_eq!((c1g1.condition.as_str(), c1g1.group.as_str()), ("condition1", "group1"));
        assert!((c1g1.mean.unwrap() - 1.75).abs() < 1e-5);
        assert!((c1g1.std.unwrap() - 0.777_817).abs() < 1e-4);

        let c1g2 = &result[1];
        assert_eq!(c1g2.group, "group2");
        assert_eq!(c1g2.count, 1);
        assert!((c1g2.mean.unwrap() - 2.1).abs() < 1e-6);
        assert!(c1g2.std.is_none());

        let c2g1 = &result[2];
        assert_eq!(c2g1.count, 1);
        assert!((c2g1.mean.unwrap() - 1.4).abs() < 1e-6);
        assert!(c2g1.std.is_none());

        let c2g2 = &result[3];
        assert!((c2g2.mean.unwrap() - 0.95).abs() < 1e-5);
        assert!((c2g2.std.unwrap() - 0.070_711).abs() < 1e-4);
    }

    #[test]
    fn test_no_cross_product_for_absent_pairs() {
        let table = Table::from_columns(&[
            ("group", vec!["a", "c"]),
            ("condition", vec!["S1 obj", "S2 match"]),
            ("value", vec!["1.0", "2.0"]),
        ])
        .unwrap();

        let result = aggregate_by_condition(&table, "value", "condition", "group").unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_all_missing_values_keep_row() {
        let table = Table::from_columns(&[
            ("group", vec!["a", "a"]),
            ("condition", vec!["S1 obj", "S1 obj"]),
            ("value", vec!["bad", "worse"]),
        ])
        .unwrap();

        let result = aggregate_by_condition(&table, "value", "condition", "group").unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].count, 0);
        assert!(result[0].mean.is_none());
    }

    #[test]
    fn test_region_group_means_absolute() {
        let table = Table::from_columns(&[
            ("region", vec!["Frontal Lobe", "Frontal Lobe", "Parietal Lobe"]),
            ("group", vec!["a", "c", "a"]),
            ("value", vec!["-4.0", "2.0", "1.0"]),
        ])
        .unwrap();

        let result = region_group_means(&table, "region", "group", "value").unwrap();
        let flat: Vec<(&str, &str, f32)> = result
            .iter()
            .map(|m| (m.region.as_str(), m.group.as_str(), m.abs_mean))
            .collect();
        assert_eq!(
            flat,
            vec![
                ("Frontal Lobe", "a", 4.0),
                ("Frontal Lobe", "c", 2.0),
                ("Parietal Lobe", "a", 1.0),
            ]
        );
    }
}
