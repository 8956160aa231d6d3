//! Error types for sweeper-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sweeper-core
#[derive(Debug, Error)]
pub enum Error {
    /// Column name appears more than once
    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Column name not present in the table
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Row length does not match the column count
    #[error("Row has {actual} values, table has {expected} columns")]
    RowLengthMismatch { expected: usize, actual: usize },

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (count: {1})")]
    ColumnOutOfBounds(usize, usize),
}
