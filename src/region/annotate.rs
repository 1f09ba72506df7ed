use crate::region::rules::{RegionRules, UNKNOWN_REGION};
use crate::table::{Cell, Result, Table};

/// Name of the column written by [`annotate_regions`]
pub const REGION_COLUMN: &str = "region";

/// Add a `region` column derived from `sensor_column` and drop the rows the
/// rule table cannot place
///
/// An existing `region` column is overwritten, so annotating twice yields
/// the same labels. Missing sensor cells count as unknown.
///
/// # Errors
/// `TableError::MissingColumn` if `sensor_column` is absent.
pub fn annotate_regions(table: &Table, sensor_column: &str, rules: &RegionRules) -> Result<Table> {
    let regions: Vec<Cell> = table
        .column(sensor_column)?
        .map(|cell| match cell.as_text() {
            Some(name) => Cell::Text(rules.classify(&name).to_string()),
            None => Cell::Missing,
        })
        .collect();

    let mut annotated = table.clone();
    annotated.set_column(REGION_COLUMN, regions)?;

    let idx = annotated.column_index(REGION_COLUMN)?;
    let before = annotated.len();
    annotated.retain_rows(|row| match &row[idx] {
        Cell::Text(region) => region != UNKNOWN_REGION,
        _ => false,
    });

    tracing::debug!(
        "Region annotation kept {} of {} rows",
        annotated.len(),
        before
    );

    Ok(annotated)
}
