//! File format detection and naming

use std::path::Path;

/// Supported tabular file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values
    Csv,
    /// Office Open XML workbook
    Xlsx,
}

impl FileFormat {
    /// Detect the format from a file name's extension, case-insensitive
    ///
    /// Exactly `.csv` and `.xlsx` are recognized.
    pub fn detect(file_name: &str) -> Option<FileFormat> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("csv") => Some(FileFormat::Csv),
            Some("xlsx") => Some(FileFormat::Xlsx),
            _ => None,
        }
    }

    /// The canonical file extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Xlsx => "xlsx",
        }
    }

    /// The MIME type for downloads
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileFormat::Csv => "text/csv",
            FileFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// Best-effort output name: the original with its extension swapped
///
/// A name without an extension gets one appended.
pub(crate) fn output_file_name(original: &str, target: FileFormat) -> String {
    Path::new(original)
        .with_extension(target.extension())
        .to_string_lossy()
        .into_owned()
}

/// The extension of a file name for error messages, or "(none)"
pub(crate) fn extension_label(file_name: &str) -> String {
    match Path::new(file_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!(".{}", ext),
        None => "(none)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_case_insensitive() {
        assert_eq!(FileFormat::detect("data.csv"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::detect("DATA.CSV"), Some(FileFormat::Csv));
        assert_eq!(FileFormat::detect("report.Xlsx"), Some(FileFormat::Xlsx));
        assert_eq!(FileFormat::detect("notes.txt"), None);
        assert_eq!(FileFormat::detect("noextension"), None);
        // .xls is not in the accepted set
        assert_eq!(FileFormat::detect("legacy.xls"), None);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("data.csv", FileFormat::Xlsx), "data.xlsx");
        assert_eq!(output_file_name("report.XLSX", FileFormat::Csv), "report.csv");
        assert_eq!(output_file_name("noext", FileFormat::Csv), "noext.csv");
        assert_eq!(
            output_file_name("archive.backup.csv", FileFormat::Xlsx),
            "archive.backup.xlsx"
        );
    }
}
