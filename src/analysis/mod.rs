// Group-comparison statistics for EEG sensor data
//
// Compares two subject groups (e.g. alcoholic vs control) sensor by sensor:
// - compare: per-position group means ranked by absolute difference
// - significance: per-position Welch t-tests, significant sensors by region
// - aggregate: mean/std of the response per (condition, group)
//
// Every operation reads a `Table` and returns a new value; nothing is
// mutated in place. Statistics come from aprender (t-tests) and trueno
// (vector mean/variance).

mod aggregate;
mod compare;
mod config;
mod significance;
mod statistics;

pub use aggregate::{
    aggregate_by_condition, region_group_means, ConditionGroupStats, RegionGroupMean,
};
pub use compare::{compare_groups, GroupComparison, PositionDifference};
pub use config::{AnalysisConfig, ColumnNames};
pub use significance::{
    test_significance, test_significance_with_rules, SignificantPosition, SignificantSensors,
};
pub use statistics::{mean, sample_std, two_sided_pvalue, welch_t_test, WelchTest};
