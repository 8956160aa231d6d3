//! Chart error types

use thiserror::Error;

/// Result type for chart operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors that can occur during chart derivation
#[derive(Debug, Error)]
pub enum ChartError {
    /// The table does not have enough numeric columns to chart
    #[error("Not enough numeric columns for visualization: found {found}, need 2")]
    NotEnoughNumericColumns { found: usize },

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] sweeper_core::Error),
}
