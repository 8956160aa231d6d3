//! The per-file processing pipeline
//!
//! One pass per user interaction: ingest, project, clean, visualize, export.
//! Failures never abort a batch; they become [`Notice`]s on the affected
//! file's report and the remaining files proceed.

use log::debug;

use crate::export::{export, Download};
use crate::format::FileFormat;
use crate::upload::UploadedFile;
use sweeper_chart::{BarChart, ChartError};
use sweeper_core::Table;

/// Severity of a user-visible message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Success/progress information
    Info,
    /// Step skipped but the pass continues (e.g. no numeric columns)
    Warning,
    /// Step failed (unreadable file, serialization failure)
    Error,
}

/// A user-visible message scoped to one file
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    fn info<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    fn warning<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    fn error<S: Into<String>>(message: S) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// The user-chosen options for one pass
#[derive(Debug, Clone, Default)]
pub struct ProcessOptions {
    /// Columns to retain; empty keeps all (never produces a zero-column table)
    pub keep_columns: Vec<String>,
    /// Remove exact-duplicate rows
    pub remove_duplicates: bool,
    /// Fill missing values in numeric columns with the column mean
    pub fill_missing: bool,
    /// Derive a bar chart from the first two numeric columns
    pub chart: bool,
    /// Serialize the result into this format
    pub convert_to: Option<FileFormat>,
}

/// Everything one pass produced for one file
#[derive(Debug, Clone)]
pub struct FileReport {
    /// The uploaded file's name
    pub file_name: String,
    /// The table after all enabled steps; `None` if ingest failed
    pub table: Option<Table>,
    /// User-visible messages, in the order the steps ran
    pub notices: Vec<Notice>,
    /// Chart model, when requested and derivable
    pub chart: Option<BarChart>,
    /// Download, when conversion was requested and succeeded
    pub download: Option<Download>,
}

impl FileReport {
    /// Check if the file was ingested at all
    pub fn ingested(&self) -> bool {
        self.table.is_some()
    }

    /// Check if any step failed
    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }
}

/// Run the pipeline over one file
///
/// Never returns an error: every failure is reported as a notice so the
/// host UI can surface it next to the file.
pub fn process_file(file: &UploadedFile, options: &ProcessOptions) -> FileReport {
    let mut notices = Vec::new();

    // Ingest; a failure here excludes the file from all later steps
    let mut table = match file.read_table() {
        Ok(table) => table,
        Err(e) => {
            notices.push(Notice::error(format!("Error reading {}: {}", file.name, e)));
            return FileReport {
                file_name: file.name.clone(),
                table: None,
                notices,
                chart: None,
                download: None,
            };
        }
    };

    // Project; an empty selection keeps all columns
    if !options.keep_columns.is_empty() {
        if let Err(e) = table.select_columns(&options.keep_columns) {
            notices.push(Notice::error(format!(
                "Column selection for {} failed: {}",
                file.name, e
            )));
        }
    }

    // Clean
    if options.remove_duplicates {
        let removed = table.dedup_rows();
        debug!("{}: removed {} duplicate rows", file.name, removed);
        notices.push(Notice::info(format!("Removed {} duplicate rows", removed)));
    }

    if options.fill_missing {
        let summary = table.fill_missing_numeric();
        if summary.numeric_columns == 0 {
            notices.push(Notice::warning(
                "No numeric columns found to fill missing values.",
            ));
        } else {
            notices.push(Notice::info(format!(
                "Filled {} missing values",
                summary.cells_filled
            )));
        }
    }

    // Visualize (read-only)
    let chart = if options.chart {
        match BarChart::from_table(&table) {
            Ok(chart) => Some(chart.with_title(file.name.clone())),
            Err(e @ ChartError::NotEnoughNumericColumns { .. }) => {
                notices.push(Notice::warning(e.to_string()));
                None
            }
            Err(e) => {
                notices.push(Notice::error(format!(
                    "Visualization for {} failed: {}",
                    file.name, e
                )));
                None
            }
        }
    } else {
        None
    };

    // Export
    let download = match options.convert_to {
        Some(target) => match export(&table, &file.name, target) {
            Ok(download) => {
                notices.push(Notice::info(format!(
                    "{} converted and ready for download as {}",
                    file.name, download.file_name
                )));
                Some(download)
            }
            Err(e) => {
                notices.push(Notice::error(format!(
                    "Error during file conversion: {}",
                    e
                )));
                None
            }
        },
        None => None,
    };

    FileReport {
        file_name: file.name.clone(),
        table: Some(table),
        notices,
        chart,
        download,
    }
}

/// Run the pipeline over a batch, sequentially and independently
///
/// An error on one file never blocks the others.
pub fn process_batch(files: &[UploadedFile], options: &ProcessOptions) -> Vec<FileReport> {
    files.iter().map(|file| process_file(file, options)).collect()
}
