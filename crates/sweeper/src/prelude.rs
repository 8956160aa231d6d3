//! Prelude module - common imports for sweeper users
//!
//! ```rust
//! use sweeper::prelude::*;
//! ```

pub use crate::{
    export,
    process_batch,
    process_file,
    // Chart types
    BarChart,
    ColumnKind,

    CsvReader,
    CsvWriter,

    Download,
    // Error types
    Error,
    // Pipeline types
    FileFormat,
    FileReport,
    Notice,
    NoticeLevel,
    ProcessOptions,
    Result,
    Series,

    // Main types
    Table,
    UploadedFile,
    Value,

    // I/O types
    XlsxReader,
    XlsxWriter,
};
