//! # sweeper-xlsx
//!
//! XLSX reader and writer for sweeper.
//!
//! Reading ingests the first worksheet of a workbook into a
//! [`sweeper_core::Table`] (header row becomes the column names); writing
//! produces a minimal single-sheet workbook with inline strings.

mod cellref;
mod error;
mod reader;
mod writer;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;
