//! A1-style cell reference helpers
//!
//! The table model has no cell addressing; A1 references only exist on the
//! XLSX wire, so the conversions live here as free functions.

use crate::error::{XlsxError, XlsxResult};

/// Convert a 0-based column index to letters (0 = A, 25 = Z, 26 = AA)
pub fn column_to_letters(col: usize) -> String {
    let mut result = String::new();
    let mut n = col + 1; // 1-based for calculation

    while n > 0 {
        n -= 1;
        let c = ((n % 26) as u8 + b'A') as char;
        result.insert(0, c);
        n /= 26;
    }

    result
}

/// A1-style reference for a 0-based (row, col) position
pub fn cell_ref(row: usize, col: usize) -> String {
    format!("{}{}", column_to_letters(col), row + 1)
}

/// Parse an A1-style reference into a 0-based (row, col) position
pub fn parse_cell_ref(s: &str) -> XlsxResult<(usize, usize)> {
    let s = s.trim();
    let digits_at = s
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| XlsxError::Parse(format!("no row number in cell reference '{}'", s)))?;
    let (letters, digits) = s.split_at(digits_at);

    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(XlsxError::Parse(format!(
            "invalid column letters in cell reference '{}'",
            s
        )));
    }
    // Excel columns stop at XFD; more letters cannot be a valid reference
    // and an unchecked accumulation would overflow
    if letters.len() > 3 {
        return Err(XlsxError::Parse(format!(
            "column letters out of range in cell reference '{}'",
            s
        )));
    }

    let mut col: usize = 0;
    for c in letters.chars() {
        col = col * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }

    let row: usize = digits
        .parse()
        .map_err(|_| XlsxError::Parse(format!("invalid row number in cell reference '{}'", s)))?;
    if row == 0 {
        return Err(XlsxError::Parse(format!(
            "row number must be >= 1 in cell reference '{}'",
            s
        )));
    }

    Ok((row - 1, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_to_letters() {
        assert_eq!(column_to_letters(0), "A");
        assert_eq!(column_to_letters(25), "Z");
        assert_eq!(column_to_letters(26), "AA");
        assert_eq!(column_to_letters(27), "AB");
        assert_eq!(column_to_letters(701), "ZZ");
        assert_eq!(column_to_letters(702), "AAA");
    }

    #[test]
    fn test_cell_ref() {
        assert_eq!(cell_ref(0, 0), "A1");
        assert_eq!(cell_ref(9, 2), "C10");
    }

    #[test]
    fn test_parse_cell_ref() {
        assert_eq!(parse_cell_ref("A1").unwrap(), (0, 0));
        assert_eq!(parse_cell_ref("C10").unwrap(), (9, 2));
        assert_eq!(parse_cell_ref("AA100").unwrap(), (99, 26));
        assert!(parse_cell_ref("A0").is_err());
        assert!(parse_cell_ref("42").is_err());
        assert!(parse_cell_ref("ABC").is_err());
    }

    #[test]
    fn test_parse_cell_ref_rejects_oversized_columns() {
        // Must be an error, not an arithmetic overflow
        assert!(parse_cell_ref("AAAAAAAAAAAAAAAAAAAA1").is_err());
        assert!(parse_cell_ref("XFDA1").is_err());
        assert_eq!(parse_cell_ref("XFD1").unwrap(), (0, 16383));
    }

    #[test]
    fn test_roundtrip() {
        for (row, col) in [(0, 0), (7, 25), (100, 26), (9999, 701)] {
            assert_eq!(parse_cell_ref(&cell_ref(row, col)).unwrap(), (row, col));
        }
    }
}
