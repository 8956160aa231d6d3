//! Table type

use std::collections::HashSet;

use ahash::RandomState;

use crate::column::ColumnKind;
use crate::error::{Error, Result};
use crate::value::{Value, ValueKey};

/// An in-memory table: ordered named columns over ordered rows of values
///
/// Column names are unique at all times and every row holds exactly one
/// value per column. The table is the unit the whole pipeline operates on:
/// one table per uploaded file, mutated in place by the projection and
/// cleaning operations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Table {
    /// Column names, in declared order
    columns: Vec<String>,
    /// Rows, each aligned with `columns`
    rows: Vec<Vec<Value>>,
}

/// Result of a mean-fill pass over the numeric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillSummary {
    /// How many numeric columns were considered
    pub numeric_columns: usize,
    /// How many missing cells were replaced with a column mean
    pub cells_filled: usize,
}

impl Table {
    /// Create a new empty table with the given column names
    ///
    /// Fails with [`Error::DuplicateColumn`] if a name repeats.
    pub fn new(columns: Vec<String>) -> Result<Self> {
        let mut seen: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateColumn(name.clone()));
            }
        }
        Ok(Self {
            columns,
            rows: Vec::new(),
        })
    }

    // === Shape ===

    /// Get the column names in declared order
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// Get the number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Find the index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    // === Access ===

    /// Get a value by row and column indices
    pub fn value_at(&self, row: usize, col: usize) -> Option<&Value> {
        self.rows.get(row).and_then(|r| r.get(col))
    }

    /// Iterate over the rows as value slices
    pub fn rows(&self) -> impl Iterator<Item = &[Value]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Iterate over the values of one column, top to bottom
    pub fn column_values(&self, col: usize) -> Result<impl Iterator<Item = &Value>> {
        if col >= self.columns.len() {
            return Err(Error::ColumnOutOfBounds(col, self.columns.len()));
        }
        Ok(self.rows.iter().map(move |r| &r[col]))
    }

    /// Infer the kind of a column from its current values
    pub fn column_kind(&self, col: usize) -> Result<ColumnKind> {
        Ok(ColumnKind::infer(self.column_values(col)?))
    }

    /// Indices of the numeric columns, in declared order
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&col| ColumnKind::infer(self.rows.iter().map(move |r| &r[col])).is_numeric())
            .collect()
    }

    // === Modification ===

    /// Append a row
    ///
    /// The row must have exactly one value per column.
    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::RowLengthMismatch {
                expected: self.columns.len(),
                actual: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Restrict the table to the named columns, in place
    ///
    /// The original column order is preserved among the selected names. An
    /// empty selection is a no-op (the table is retained unchanged) so a
    /// selection can never produce a zero-column table. A name not present
    /// in the table is an error and leaves the table unchanged.
    pub fn select_columns<S: AsRef<str>>(&mut self, names: &[S]) -> Result<()> {
        if names.is_empty() {
            return Ok(());
        }

        let mut selected: HashSet<&str, RandomState> = HashSet::with_hasher(RandomState::new());
        for name in names {
            let name = name.as_ref();
            if self.column_index(name).is_none() {
                return Err(Error::UnknownColumn(name.to_string()));
            }
            selected.insert(name);
        }

        let keep: Vec<usize> = (0..self.columns.len())
            .filter(|&i| selected.contains(self.columns[i].as_str()))
            .collect();

        self.columns = keep.iter().map(|&i| self.columns[i].clone()).collect();
        for row in &mut self.rows {
            *row = keep.iter().map(|&i| row[i].clone()).collect();
        }
        Ok(())
    }

    /// Remove rows that exactly duplicate an earlier row
    ///
    /// Keeps the first occurrence; surviving row order is preserved.
    /// Returns the number of rows removed. Idempotent.
    pub fn dedup_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<ValueKey>, RandomState> =
            HashSet::with_capacity_and_hasher(before, RandomState::new());
        self.rows
            .retain(|row| seen.insert(row.iter().map(Value::key).collect()));
        before - self.rows.len()
    }

    /// Fill missing values in numeric columns with the column mean
    ///
    /// The mean is computed over the present numbers at call time, so a
    /// second application is a no-op. Columns that are not numeric (or hold
    /// no numbers at all) are left untouched.
    pub fn fill_missing_numeric(&mut self) -> FillSummary {
        let mut summary = FillSummary::default();

        for col in self.numeric_columns() {
            summary.numeric_columns += 1;

            let mut sum = 0.0;
            let mut count = 0usize;
            for row in &self.rows {
                if let Value::Number(n) = &row[col] {
                    sum += *n;
                    count += 1;
                }
            }
            // numeric_columns() guarantees at least one number
            let mean = sum / count as f64;

            for row in &mut self.rows {
                if row[col].is_missing() {
                    row[col] = Value::Number(mean);
                    summary.cells_filled += 1;
                }
            }
        }

        summary
    }

    /// A copy of the first `n` rows with the same columns, for previews
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
