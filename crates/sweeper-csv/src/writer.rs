//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use sweeper_core::Table;

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a table to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(table, file, options)
    }

    /// Write a table to a writer
    ///
    /// Missing values are written as empty fields. No row index is emitted.
    pub fn write<W: Write>(table: &Table, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
            LineTerminator::CR => csv::Terminator::Any(b'\r'),
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .from_writer(writer);

        if options.write_header {
            csv_writer.write_record(table.column_names())?;
        }

        for row in table.rows() {
            let record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::Value;

    #[test]
    fn test_write_header_and_missing() {
        let mut table = Table::new(vec!["a".into(), "b".into()]).unwrap();
        table.push_row(vec![1.0.into(), "x".into()]).unwrap();
        table.push_row(vec![Value::Missing, "y".into()]).unwrap();

        let mut buf = Vec::new();
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::LF,
            ..CsvWriteOptions::default()
        };
        CsvWriter::write(&table, &mut buf, &options).unwrap();

        assert_eq!(String::from_utf8(buf).unwrap(), "a,b\n1,x\n,y\n");
    }
}
