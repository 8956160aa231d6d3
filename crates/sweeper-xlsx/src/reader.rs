//! XLSX reader

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use log::{debug, warn};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::cellref::parse_cell_ref;
use crate::error::{XlsxError, XlsxResult};
use sweeper_core::{StringPool, Table, Value};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode special characters in XML:
/// `_x000d_` = CR, `_x000a_` = LF, `_x0009_` = Tab, `_x005f_` = underscore.
fn decode_excel_escapes(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut hex_chars = String::new();
        let mut is_escape = false;

        if chars.peek() == Some(&'x') {
            chars.next(); // consume 'x'

            for _ in 0..4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                chars.next(); // consume closing '_'
                if let Some(decoded) =
                    u32::from_str_radix(&hex_chars, 16).ok().and_then(char::from_u32)
                {
                    result.push(decoded);
                    is_escape = true;
                }
            }
        }

        if !is_escape {
            // Not a valid escape sequence, output what we consumed
            result.push('_');
            if !hex_chars.is_empty() {
                result.push('x');
                result.push_str(&hex_chars);
            }
        }
    }

    result
}

/// Sparse cell grid, keyed by row then column (both 0-based)
type CellGrid = BTreeMap<usize, BTreeMap<usize, Value>>;

/// XLSX file reader
///
/// Ingests the first worksheet of a workbook. The first row present in the
/// sheet is the header; header cells that are absent or blank get generated
/// `Column{n}` names.
pub struct XlsxReader;

impl XlsxReader {
    /// Read a table from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Table> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a table from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Table> {
        let mut archive = zip::ZipArchive::new(reader)?;

        // Verify this is an XLSX file
        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let sheet_info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let (sheet_name, r_id) = sheet_info
            .first()
            .ok_or_else(|| XlsxError::InvalidFormat("Workbook has no sheets".into()))?;
        let path = sheet_paths.get(r_id).ok_or_else(|| {
            XlsxError::MissingPart(format!("worksheet part for sheet '{}'", sheet_name))
        })?;
        debug!("reading sheet {:?} from {}", sheet_name, path);

        let cells = Self::read_sheet_cells(&mut archive, path, &shared_strings)?;
        Self::build_table(cells)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings), // No shared strings is valid
        };

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"t" if in_si => {
                        in_t = true;
                    }
                    _ => {}
                },
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"t" => {
                        in_t = false;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    /// Read workbook.xml to get sheet names and rIds, in workbook order
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<(String, String)>> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut sheets = Vec::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                    let mut name = None;
                    let mut r_id = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"name" => {
                                name = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"r:id" => {
                                r_id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(name), Some(r_id)) = (name, r_id) {
                        sheets.push((name, r_id));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(sheets)
    }

    /// Read workbook.xml.rels to map rIds to worksheet part paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let mut id = None;
                    let mut target = None;
                    let mut rel_type = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"Id" => {
                                id = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Target" => {
                                target = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            b"Type" => {
                                rel_type = attr.unescape_value().ok().map(|s| s.to_string());
                            }
                            _ => {}
                        }
                    }

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Target is relative to xl/ unless absolute
                            let full_path = if let Some(stripped) = target.strip_prefix('/') {
                                stripped.to_string()
                            } else {
                                format!("xl/{}", target)
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read all typed cells of one worksheet into a sparse grid
    fn read_sheet_cells<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        shared_strings: &[String],
    ) -> XlsxResult<CellGrid> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let reader = BufReader::new(file);
        let mut xml_reader = Reader::from_reader(reader);
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut pool = StringPool::new();
        let mut cells = CellGrid::new();

        // Current cell state
        let mut current_ref: Option<(usize, usize)> = None;
        let mut current_type: Option<String> = None;
        let mut current_text: Option<String> = None;
        let mut in_value = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"c" => {
                        let (cell_ref, cell_type) = Self::cell_attrs(&e)?;
                        current_ref = cell_ref;
                        current_type = cell_type;
                        current_text = None;
                    }
                    b"v" => in_value = true,
                    b"t" => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_value || in_inline_text => {
                    if let Ok(text) = e.unescape() {
                        current_text
                            .get_or_insert_with(String::new)
                            .push_str(&text);
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"v" => in_value = false,
                    b"t" => in_inline_text = false,
                    b"c" => {
                        let cell_type = current_type.take();
                        let text = current_text.take();
                        if let Some((row, col)) = current_ref.take() {
                            let value = Self::cell_value(
                                cell_type.as_deref(),
                                text,
                                shared_strings,
                                &mut pool,
                            );
                            // Absent entries become Missing when the table
                            // is built, so only typed values are stored
                            if !value.is_missing() {
                                cells.entry(row).or_default().insert(col, value);
                            }
                        }
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(cells)
    }

    /// Extract the `r` (reference) and `t` (type) attributes of a cell
    fn cell_attrs(e: &BytesStart<'_>) -> XlsxResult<(Option<(usize, usize)>, Option<String>)> {
        let mut cell_ref = None;
        let mut cell_type = None;

        for attr in e.attributes().flatten() {
            match attr.key.as_ref() {
                b"r" => {
                    if let Ok(v) = attr.unescape_value() {
                        cell_ref = Some(parse_cell_ref(&v)?);
                    }
                }
                b"t" => {
                    cell_type = attr.unescape_value().ok().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        if cell_ref.is_none() {
            warn!("skipping cell without an r attribute");
        }
        Ok((cell_ref, cell_type))
    }

    /// Convert a raw cell (type attribute + gathered text) into a value
    ///
    /// Booleans become 1/0 numbers and error cells become missing; the table
    /// scalar model has neither.
    fn cell_value(
        cell_type: Option<&str>,
        text: Option<String>,
        shared_strings: &[String],
        pool: &mut StringPool,
    ) -> Value {
        let text = match text {
            Some(t) => t,
            None => return Value::Missing,
        };

        match cell_type {
            Some("s") => {
                let resolved = text
                    .trim()
                    .parse::<usize>()
                    .ok()
                    .and_then(|i| shared_strings.get(i));
                match resolved {
                    Some(s) => Value::Text(pool.intern(s)),
                    None => {
                        warn!("shared string index '{}' out of range", text);
                        Value::Missing
                    }
                }
            }
            Some("inlineStr") | Some("str") => {
                Value::Text(pool.intern(decode_excel_escapes(&text)))
            }
            Some("b") => Value::Number(if text.trim() == "1" { 1.0 } else { 0.0 }),
            Some("e") => {
                warn!("treating error cell '{}' as missing", text);
                Value::Missing
            }
            _ => match text.trim().parse::<f64>() {
                Ok(n) => Value::Number(n),
                Err(_) => {
                    warn!("untyped cell '{}' is not numeric, keeping as text", text);
                    Value::Text(pool.intern(text.as_str()))
                }
            },
        }
    }

    /// Assemble the table: first present row is the header, the rest are data
    fn build_table(cells: CellGrid) -> XlsxResult<Table> {
        let column_count = cells
            .values()
            .flat_map(|row| row.keys().copied())
            .max()
            .map(|max| max + 1)
            .unwrap_or(0);
        if column_count == 0 {
            return Err(XlsxError::InvalidFormat("Sheet has no cells".into()));
        }

        let mut rows_iter = cells.into_iter();
        let (_, header) = rows_iter
            .next()
            .ok_or_else(|| XlsxError::InvalidFormat("Sheet has no rows".into()))?;

        let columns: Vec<String> = (0..column_count)
            .map(|col| match header.get(&col) {
                Some(v) if !v.to_string().is_empty() => v.to_string(),
                _ => format!("Column{}", col + 1),
            })
            .collect();
        let mut table = Table::new(columns)?;

        for (_, mut row_cells) in rows_iter {
            let mut row = Vec::with_capacity(column_count);
            for col in 0..column_count {
                row.push(row_cells.remove(&col).unwrap_or(Value::Missing));
            }
            table.push_row(row)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_excel_escapes() {
        assert_eq!(decode_excel_escapes("a_x000a_b"), "a\nb");
        assert_eq!(decode_excel_escapes("a_x005f_b"), "a_b");
        // Incomplete sequences pass through unchanged
        assert_eq!(decode_excel_escapes("a_x00b"), "a_x00b");
        assert_eq!(decode_excel_escapes("plain"), "plain");
    }

    #[test]
    fn test_cell_value_types() {
        let shared = vec!["hello".to_string()];
        let mut pool = StringPool::new();

        let v = XlsxReader::cell_value(Some("s"), Some("0".into()), &shared, &mut pool);
        assert_eq!(v.as_text(), Some("hello"));

        let v = XlsxReader::cell_value(None, Some("3.5".into()), &shared, &mut pool);
        assert_eq!(v.as_number(), Some(3.5));

        let v = XlsxReader::cell_value(Some("b"), Some("1".into()), &shared, &mut pool);
        assert_eq!(v.as_number(), Some(1.0));

        let v = XlsxReader::cell_value(Some("e"), Some("#N/A".into()), &shared, &mut pool);
        assert!(v.is_missing());

        let v = XlsxReader::cell_value(Some("s"), Some("99".into()), &shared, &mut pool);
        assert!(v.is_missing());
    }
}
