//! XLSX writer

use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;

use crate::cellref::cell_ref;
use crate::error::XlsxResult;
use sweeper_core::{Table, Value};

/// XLSX file writer
///
/// Produces a minimal single-sheet workbook: header row plus data rows,
/// strings inline, numbers as native values, missing cells omitted. No row
/// index column is emitted.
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a table to a file path
    pub fn write_file<P: AsRef<Path>>(table: &Table, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        Self::write(table, file)
    }

    /// Write a table to a writer
    pub fn write<W: Write + Seek>(table: &Table, writer: W) -> XlsxResult<()> {
        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip)?;
        Self::write_workbook_rels(&mut zip)?;
        Self::write_sheet(&mut zip, table)?;

        zip.finish()?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml".to_string(), options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels".to_string(), options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml".to_string(), options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>
        <sheet name="Sheet1" sheetId="1" r:id="rId1"/>
    </sheets>
</workbook>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels".to_string(), options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_sheet<W: Write + Seek>(zip: &mut zip::ZipWriter<W>, table: &Table) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/worksheets/sheet1.xml".to_string(), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
    <sheetData>"#,
        );

        // Header row
        content.push_str("\n        <row r=\"1\">");
        for (col, name) in table.column_names().iter().enumerate() {
            content.push_str(&format!(
                "\n            <c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                cell_ref(0, col),
                escape_xml(name)
            ));
        }
        content.push_str("\n        </row>");

        // Data rows; missing cells are simply not written
        for (i, row) in table.rows().enumerate() {
            content.push_str(&format!("\n        <row r=\"{}\">", i + 2));
            for (col, value) in row.iter().enumerate() {
                let r = cell_ref(i + 1, col);
                match value {
                    Value::Number(n) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"><v>{}</v></c>",
                            r, n
                        ));
                    }
                    Value::Text(s) => {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\" t=\"inlineStr\"><is><t>{}</t></is></c>",
                            r,
                            escape_xml(s.as_str())
                        ));
                    }
                    Value::Missing => {}
                }
            }
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::XlsxReader;
    use std::io::Cursor;

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&apos;");
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut table = Table::new(vec!["name".into(), "score".into()]).unwrap();
        table.push_row(vec!["x & y".into(), 1.5.into()]).unwrap();
        table.push_row(vec![Value::Missing, 2.0.into()]).unwrap();

        let mut buf = Vec::new();
        XlsxWriter::write(&table, Cursor::new(&mut buf)).unwrap();

        let table2 = XlsxReader::read(Cursor::new(&buf)).unwrap();
        assert_eq!(table2.column_names(), table.column_names());
        assert_eq!(table2.row_count(), 2);
        assert_eq!(table2.value_at(0, 0).unwrap().as_text(), Some("x & y"));
        assert_eq!(table2.value_at(0, 1).unwrap().as_number(), Some(1.5));
        assert!(table2.value_at(1, 0).unwrap().is_missing());
    }

    #[test]
    fn test_write_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xlsx");

        let mut table = Table::new(vec!["a".into()]).unwrap();
        table.push_row(vec![42.0.into()]).unwrap();

        XlsxWriter::write_file(&table, &path).unwrap();
        let table2 = XlsxReader::read_file(&path).unwrap();
        assert_eq!(table2.value_at(0, 0).unwrap().as_number(), Some(42.0));
    }
}
