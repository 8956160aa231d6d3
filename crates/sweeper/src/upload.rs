//! Uploaded file ingestion

use std::io::Cursor;

use log::debug;

use crate::error::{Error, Result};
use crate::format::{extension_label, FileFormat};
use sweeper_core::Table;
use sweeper_csv::{CsvReadOptions, CsvReader};
use sweeper_xlsx::XlsxReader;

/// An uploaded file: a declared name plus its raw bytes
///
/// Immutable input; the pipeline reads it once per pass and never mutates it.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Declared file name (drives format detection)
    pub name: String,
    /// Raw content
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// Create a new uploaded file
    pub fn new<S: Into<String>>(name: S, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// File size in KiB, for preview display
    pub fn size_kb(&self) -> f64 {
        self.bytes.len() as f64 / 1024.0
    }

    /// The detected format, or [`Error::UnsupportedFormat`]
    pub fn format(&self) -> Result<FileFormat> {
        FileFormat::detect(&self.name).ok_or_else(|| Error::UnsupportedFormat {
            file: self.name.clone(),
            extension: extension_label(&self.name),
        })
    }

    /// Parse the file content into a table
    pub fn read_table(&self) -> Result<Table> {
        let table = match self.format()? {
            FileFormat::Csv => CsvReader::read(self.bytes.as_slice(), &CsvReadOptions::default())?,
            FileFormat::Xlsx => XlsxReader::read(Cursor::new(&self.bytes))?,
        };
        debug!(
            "parsed {} ({} rows x {} columns)",
            self.name,
            table.row_count(),
            table.column_count()
        );
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_table_csv() {
        let file = UploadedFile::new("data.csv", b"a,b\n1,2\n".to_vec());
        let table = file.read_table().unwrap();
        assert_eq!(table.column_names(), &["a".to_string(), "b".to_string()]);
        assert_eq!(table.value_at(0, 1).unwrap().as_number(), Some(2.0));
    }

    #[test]
    fn test_read_table_unsupported_extension() {
        let file = UploadedFile::new("notes.txt", b"a,b\n1,2\n".to_vec());
        let err = file.read_table().unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_read_table_malformed_xlsx() {
        // Declared .xlsx but not a zip archive
        let file = UploadedFile::new("data.xlsx", b"not a workbook".to_vec());
        assert!(matches!(
            file.read_table().unwrap_err(),
            Error::Xlsx(_)
        ));
    }

    #[test]
    fn test_size_kb() {
        let file = UploadedFile::new("data.csv", vec![0u8; 2048]);
        assert_eq!(file.size_kb(), 2.0);
    }
}
