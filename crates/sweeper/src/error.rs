//! Error types for the sweeper facade

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the sweeper pipeline
#[derive(Debug, Error)]
pub enum Error {
    /// File extension outside the accepted set
    #[error("Unsupported file type: {extension}")]
    UnsupportedFormat {
        /// The offending file name
        file: String,
        /// Its extension, or "(none)"
        extension: String,
    },

    /// Core table error
    #[error(transparent)]
    Core(#[from] sweeper_core::Error),

    /// CSV read/write error
    #[error(transparent)]
    Csv(#[from] sweeper_csv::CsvError),

    /// XLSX read/write error
    #[error(transparent)]
    Xlsx(#[from] sweeper_xlsx::XlsxError),

    /// Chart derivation error
    #[error(transparent)]
    Chart(#[from] sweeper_chart::ChartError),
}
