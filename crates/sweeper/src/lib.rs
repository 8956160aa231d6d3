//! # sweeper
//!
//! A library for cleaning tabular files and converting them between CSV and
//! XLSX. It backs a file-upload UI: the host hands over uploaded bytes, runs
//! the pipeline, and gets back tables, notices, an optional chart model, and
//! an in-memory download.
//!
//! ## Pipeline
//!
//! Per file: ingest (format by extension) → project (column subset) → clean
//! (drop duplicate rows, fill missing numeric values with the column mean) →
//! visualize (bar chart of the first two numeric columns) → export (the
//! other format, with filename and MIME type). Files are processed
//! independently; an unreadable file is reported and skipped while the rest
//! of the batch proceeds.
//!
//! ## Example
//!
//! ```rust
//! use sweeper::prelude::*;
//!
//! let file = UploadedFile::new("scores.csv", b"name,a,b\nx,1,10\nx,1,10\n".to_vec());
//! let options = ProcessOptions {
//!     remove_duplicates: true,
//!     convert_to: Some(FileFormat::Xlsx),
//!     ..ProcessOptions::default()
//! };
//!
//! let report = process_file(&file, &options);
//! let table = report.table.as_ref().unwrap();
//! assert_eq!(table.row_count(), 1);
//! assert_eq!(report.download.as_ref().unwrap().file_name, "scores.xlsx");
//! ```

pub mod error;
pub mod export;
pub mod format;
pub mod pipeline;
pub mod prelude;
pub mod upload;

pub use error::{Error, Result};
pub use export::{export, Download};
pub use format::FileFormat;
pub use pipeline::{
    process_batch, process_file, FileReport, Notice, NoticeLevel, ProcessOptions,
};
pub use upload::UploadedFile;

// Re-export core types
pub use sweeper_core::{ColumnKind, FillSummary, SharedString, StringPool, Table, Value};

// Re-export chart types
pub use sweeper_chart::{Axis, BarChart, ChartError, Series};

// Re-export I/O types
pub use sweeper_csv::{CsvError, CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
pub use sweeper_xlsx::{XlsxError, XlsxReader, XlsxWriter};
