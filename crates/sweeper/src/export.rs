//! Table export into downloadable bytes

use std::io::Cursor;

use log::debug;

use crate::error::Result;
use crate::format::{output_file_name, FileFormat};
use sweeper_core::Table;
use sweeper_csv::{CsvWriteOptions, CsvWriter};
use sweeper_xlsx::XlsxWriter;

/// A finished conversion: bytes plus the metadata a download needs
#[derive(Debug, Clone)]
pub struct Download {
    /// Suggested file name (original with the extension swapped)
    pub file_name: String,
    /// MIME type matching the target format
    pub mime_type: &'static str,
    /// Serialized content
    pub bytes: Vec<u8>,
}

/// Serialize a table into an in-memory download
///
/// The only format-branching step in the pipeline: everything upstream
/// operates on the format-agnostic [`Table`].
pub fn export(table: &Table, original_name: &str, target: FileFormat) -> Result<Download> {
    let mut bytes = Vec::new();
    match target {
        FileFormat::Csv => CsvWriter::write(table, &mut bytes, &CsvWriteOptions::default())?,
        FileFormat::Xlsx => XlsxWriter::write(table, Cursor::new(&mut bytes))?,
    }

    let file_name = output_file_name(original_name, target);
    debug!(
        "serialized {} ({} bytes, {})",
        file_name,
        bytes.len(),
        target.mime_type()
    );
    Ok(Download {
        file_name,
        mime_type: target.mime_type(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_csv_metadata() {
        let mut table = Table::new(vec!["a".into()]).unwrap();
        table.push_row(vec![1.0.into()]).unwrap();

        let download = export(&table, "report.xlsx", FileFormat::Csv).unwrap();
        assert_eq!(download.file_name, "report.csv");
        assert_eq!(download.mime_type, "text/csv");
        assert!(!download.bytes.is_empty());
    }

    #[test]
    fn test_export_xlsx_metadata() {
        let mut table = Table::new(vec!["a".into()]).unwrap();
        table.push_row(vec![1.0.into()]).unwrap();

        let download = export(&table, "report.csv", FileFormat::Xlsx).unwrap();
        assert_eq!(download.file_name, "report.xlsx");
        assert_eq!(
            download.mime_type,
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }
}
