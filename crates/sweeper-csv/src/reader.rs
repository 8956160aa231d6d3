//! CSV reader

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CsvError, CsvResult};
use crate::options::CsvReadOptions;
use sweeper_core::{StringPool, Table, Value};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Table> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from a reader into a table
    ///
    /// The first record is the header and becomes the column names. Records
    /// shorter than the header are padded with missing values; longer ones
    /// are an error.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(headers.len());
        for name in headers.iter() {
            if !seen.insert(name) {
                return Err(CsvError::DuplicateHeader(name.to_string()));
            }
            columns.push(name.to_string());
        }

        let column_count = columns.len();
        let mut table = Table::new(columns)?;
        let mut pool = StringPool::new();

        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            if record.len() > column_count {
                return Err(CsvError::Record {
                    row: idx + 1,
                    message: format!(
                        "{} fields, header has {}",
                        record.len(),
                        column_count
                    ),
                });
            }

            let mut row = Vec::with_capacity(column_count);
            for field in record.iter() {
                let value = if options.auto_detect_types {
                    Self::detect_type(field, &mut pool)
                } else {
                    Value::Text(pool.intern(field))
                };
                row.push(value);
            }
            row.resize(column_count, Value::Missing);
            table.push_row(row)?;
        }

        Ok(table)
    }

    /// Detect the type of a field value
    ///
    /// Classification ignores surrounding whitespace, but text values are
    /// stored exactly as they appear in the field.
    fn detect_type(field: &str, pool: &mut StringPool) -> Value {
        let trimmed = field.trim();

        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
            return Value::Missing;
        }

        if let Ok(n) = trimmed.parse::<f64>() {
            return Value::Number(n);
        }

        Value::Text(pool.intern(field))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_typed_fields() {
        let data = "name,score\nalice,10\nbob,\ncarol,nan\n";
        let table = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        assert_eq!(table.column_names(), &["name".to_string(), "score".to_string()]);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.value_at(0, 1).unwrap().as_number(), Some(10.0));
        assert!(table.value_at(1, 1).unwrap().is_missing());
        assert!(table.value_at(2, 1).unwrap().is_missing());
    }

    #[test]
    fn test_read_keeps_text_whitespace() {
        let data = "name,note\nalice, fast \nbob, 12 \n";
        let table = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();

        // Padded text survives untouched; padded numbers still parse
        assert_eq!(table.value_at(0, 1).unwrap().as_text(), Some(" fast "));
        assert_eq!(table.value_at(1, 1).unwrap().as_number(), Some(12.0));
    }

    #[test]
    fn test_read_pads_short_records() {
        let data = "a,b,c\n1,2\n";
        let table = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert!(table.value_at(0, 2).unwrap().is_missing());
    }

    #[test]
    fn test_read_rejects_duplicate_headers() {
        let data = "a,a\n1,2\n";
        let err = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::DuplicateHeader(_)));
    }

    #[test]
    fn test_read_rejects_long_records() {
        let data = "a,b\n1,2,3\n";
        let err = CsvReader::read(data.as_bytes(), &CsvReadOptions::default()).unwrap_err();
        assert!(matches!(err, CsvError::Record { row: 1, .. }));
    }

    #[test]
    fn test_read_without_type_detection() {
        let data = "a\n42\n";
        let options = CsvReadOptions {
            auto_detect_types: false,
            ..CsvReadOptions::default()
        };
        let table = CsvReader::read(data.as_bytes(), &options).unwrap();
        assert_eq!(table.value_at(0, 0).unwrap().as_text(), Some("42"));
    }
}
