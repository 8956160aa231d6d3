//! # sweeper-csv
//!
//! CSV reader and writer for sweeper.

mod reader;
mod writer;
mod options;
mod error;

pub use reader::CsvReader;
pub use writer::CsvWriter;
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use error::{CsvError, CsvResult};
