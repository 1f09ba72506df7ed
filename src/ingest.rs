//! CSV ingestion and cleaning
//!
//! Finds every `*.csv` under a directory, parses each into a [`Table`],
//! concatenates them by column name, drops exact duplicates and rows with
//! missing cells. Unreadable or empty files are logged and skipped so one bad
//! file does not sink the batch.

use crate::table::{Cell, Table};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::{Path, PathBuf};

/// What happened while loading a directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// CSV files found under the directory
    pub files_found: usize,

    /// Files parsed and concatenated
    pub files_loaded: usize,

    /// Files skipped, with the reason
    pub files_skipped: Vec<(PathBuf, String)>,

    /// Rows before cleaning
    pub rows_read: usize,

    /// Exact duplicate rows removed
    pub duplicates_dropped: usize,

    /// Rows removed because a cell was missing
    pub incomplete_dropped: usize,
}

/// All `*.csv` files below `dir`, in sorted path order
pub fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("Data directory not found: {}", dir.display());
    }

    let root = dir
        .to_str()
        .with_context(|| format!("Data directory is not valid UTF-8: {}", dir.display()))?;
    let pattern = format!("{}/**/*.csv", glob::Pattern::escape(root));

    let mut files: Vec<PathBuf> = glob::glob(&pattern)
        .with_context(|| format!("Invalid glob pattern: {}", pattern))?
        .filter_map(|entry| match entry {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("Skipping unreadable path: {}", e);
                None
            }
        })
        .filter(|path| path.is_file())
        .collect();

    files.sort();
    Ok(files)
}

/// Parse one CSV file with a header row
pub fn read_csv_file(path: &Path) -> Result<Table> {
    let file =
        File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Failed to read header of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut table = Table::new(headers)
        .with_context(|| format!("Invalid header in {}", path.display()))?;

    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("Failed to parse record {} of {}", line + 1, path.display()))?;
        let row = record.iter().map(Cell::from_field).collect();
        table
            .push_row(row)
            .with_context(|| format!("Bad record {} in {}", line + 1, path.display()))?;
    }

    Ok(table)
}

/// Load, concatenate and clean every CSV file below `dir`
///
/// Returns an empty table (no columns) when nothing could be loaded.
///
/// # Errors
/// Only when `dir` is not a readable directory; per-file problems are logged
/// and recorded in the summary.
pub fn load_directory(dir: &Path) -> Result<(Table, IngestSummary)> {
    let files = find_csv_files(dir)?;
    let mut summary = IngestSummary {
        files_found: files.len(),
        ..IngestSummary::default()
    };

    let mut combined: Option<Table> = None;

    for path in files {
        tracing::debug!("Reading file: {}", path.display());

        match read_csv_file(&path) {
            Ok(table) if table.is_empty() => {
                tracing::warn!("{} is empty, skipping", path.display());
                summary.files_skipped.push((path, "empty file".to_string()));
            }
            Ok(table) => {
                summary.files_loaded += 1;
                match combined.as_mut() {
                    Some(acc) => acc.concat(table),
                    None => combined = Some(table),
                }
            }
            Err(e) => {
                tracing::warn!("Error reading {}: {:#}", path.display(), e);
                summary.files_skipped.push((path, format!("{:#}", e)));
            }
        }
    }

    let Some(mut table) = combined else {
        tracing::warn!("No CSV data loaded from {}", dir.display());
        return Ok((Table::default(), summary));
    };

    summary.rows_read = table.len();
    summary.duplicates_dropped = table.drop_duplicates();
    summary.incomplete_dropped = table.drop_missing();

    tracing::info!(
        "Loaded {} rows from {} files ({} duplicates, {} incomplete rows dropped)",
        table.len(),
        summary.files_loaded,
        summary.duplicates_dropped,
        summary.incomplete_dropped
    );

    Ok((table, summary))
}

/// Write a table as CSV with a header row and no index column
pub fn write_csv(table: &Table, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer
        .write_record(table.headers())
        .with_context(|| format!("Failed to write header to {}", path.display()))?;

    for row in table.rows() {
        let fields: Vec<String> = row
            .iter()
            .map(|cell| cell.as_text().unwrap_or_default())
            .collect();
        writer
            .write_record(&fields)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    tracing::info!("Wrote {} rows to {}", table.len(), path.display());
    Ok(())
}
