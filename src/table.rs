//! In-memory observation table
//!
//! A small column-named table that the analysis stages pass down the
//! pipeline. Cells carry an explicit missing state instead of a sentinel
//! number, so each operation decides for itself whether to skip or
//! propagate gaps.

use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by table-shaped operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Row has {actual} cells but the table has {expected} columns")]
    RowWidth { expected: usize, actual: usize },

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, TableError>;

/// A single table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Missing,
    Number(f32),
    Text(String),
}

impl Cell {
    /// Build a cell from a raw CSV field; empty fields are missing
    pub fn from_field(field: &str) -> Self {
        if field.is_empty() {
            Cell::Missing
        } else {
            Cell::Text(field.to_string())
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Text view of the cell (numbers are formatted, missing is `None`)
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Missing => None,
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }

    /// Borrowed string view, only for text cells
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view of the cell
    ///
    /// Text cells are parsed on the fly. Anything that does not parse to a
    /// finite number (including the literal "NaN") is `None`.
    pub fn as_number(&self) -> Option<f32> {
        match self {
            Cell::Missing => None,
            Cell::Number(v) if v.is_finite() => Some(*v),
            Cell::Number(_) => None,
            Cell::Text(s) => s.trim().parse::<f32>().ok().filter(|v| v.is_finite()),
        }
    }

    /// Key used for grouping and equality on the raw value
    pub fn key(&self) -> Option<String> {
        self.as_text()
    }
}

/// Column-named table of cells, row-major
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Create an empty table with the given column names
    pub fn new(headers: Vec<String>) -> Result<Self> {
        let mut seen = HashSet::new();
        for name in &headers {
            if !seen.insert(name.as_str()) {
                return Err(TableError::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            headers,
            rows: Vec::new(),
        })
    }

    /// Build a table from string columns, convenient for fixtures
    ///
    /// Every column must have the same length.
    pub fn from_columns(columns: &[(&str, Vec<&str>)]) -> Result<Self> {
        let headers = columns.iter().map(|(name, _)| name.to_string()).collect();
        let mut table = Self::new(headers)?;
        let n_rows = columns.first().map(|(_, values)| values.len()).unwrap_or(0);

        for i in 0..n_rows {
            let row = columns
                .iter()
                .map(|(_, values)| {
                    values
                        .get(i)
                        .map(|v| Cell::from_field(v))
                        .unwrap_or(Cell::Missing)
                })
                .collect();
            table.push_row(row)?;
        }

        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row; its width must match the header
    pub fn push_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if row.len() != self.headers.len() {
            return Err(TableError::RowWidth {
                expected: self.headers.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Index of a column, or `MissingColumn`
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| TableError::MissingColumn(name.to_string()))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    /// Iterate over the cells of one column
    pub fn column(&self, name: &str) -> Result<impl Iterator<Item = &Cell> + '_> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(move |row| &row[idx]))
    }

    /// Numeric view of one column (missing or unparseable cells are `None`)
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f32>>> {
        Ok(self.column(name)?.map(Cell::as_number).collect())
    }

    /// Coerce a column to numbers in place
    ///
    /// Values that fail to parse become [`Cell::Missing`]. Returns the number
    /// of cells that could not be converted.
    pub fn coerce_numeric(&mut self, name: &str) -> Result<usize> {
        let idx = self.column_index(name)?;
        let mut failed = 0;

        for row in &mut self.rows {
            let cell = &mut row[idx];
            *cell = match cell.as_number() {
                Some(v) => Cell::Number(v),
                None => {
                    failed += 1;
                    Cell::Missing
                }
            };
        }

        Ok(failed)
    }

    /// Set a column from one cell per row, adding it if it does not exist
    pub fn set_column(&mut self, name: &str, cells: Vec<Cell>) -> Result<()> {
        if cells.len() != self.rows.len() {
            return Err(TableError::RowWidth {
                expected: self.rows.len(),
                actual: cells.len(),
            });
        }

        match self.column_index(name) {
            Ok(idx) => {
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    row[idx] = cell;
                }
            }
            Err(_) => {
                self.headers.push(name.to_string());
                for (row, cell) in self.rows.iter_mut().zip(cells) {
                    row.push(cell);
                }
            }
        }

        Ok(())
    }

    /// Keep only the rows for which `keep` returns true
    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Cell]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    /// Drop rows that contain any missing cell; returns how many were dropped
    pub fn drop_missing(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().any(Cell::is_missing));
        before - self.rows.len()
    }

    /// Drop exact duplicate rows, keeping the first occurrence
    pub fn drop_duplicates(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen = HashSet::new();
        self.rows.retain(|row| {
            let key: Vec<Option<String>> = row.iter().map(Cell::key).collect();
            seen.insert(key)
        });
        before - self.rows.len()
    }

    /// Append another table, aligning columns by name
    ///
    /// Columns only present in `other` are added; cells for columns a side
    /// does not have are missing.
    pub fn concat(&mut self, other: Table) {
        for name in &other.headers {
            if !self.has_column(name) {
                self.headers.push(name.clone());
                for row in &mut self.rows {
                    row.push(Cell::Missing);
                }
            }
        }

        let mapping: Vec<Option<usize>> = self
            .headers
            .iter()
            .map(|h| other.headers.iter().position(|o| o == h))
            .collect();

        for mut row in other.rows {
            let aligned = mapping
                .iter()
                .map(|src| match src {
                    Some(i) => std::mem::replace(&mut row[*i], Cell::Missing),
                    None => Cell::Missing,
                })
                .collect();
            self.rows.push(aligned);
        }
    }
}
