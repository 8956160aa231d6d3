//! # sweeper-core
//!
//! Core data structures for the sweeper tabular cleaning toolkit.
//!
//! This crate provides the fundamental types used throughout sweeper:
//! - [`Value`] - A typed scalar (number, text, or missing)
//! - [`Table`] - Ordered named columns over ordered rows of values
//! - [`ColumnKind`] - Inferred column typing (numeric, text, empty)
//!
//! The format-agnostic operations live on [`Table`]: column projection,
//! exact-duplicate removal, and mean-filling of missing numeric values.
//!
//! ## Example
//!
//! ```rust
//! use sweeper_core::{Table, Value};
//!
//! let mut table = Table::new(vec!["name".into(), "score".into()]).unwrap();
//! table.push_row(vec!["alice".into(), 10.0.into()]).unwrap();
//! table.push_row(vec!["bob".into(), Value::Missing]).unwrap();
//!
//! let summary = table.fill_missing_numeric();
//! assert_eq!(summary.cells_filled, 1);
//! assert_eq!(table.value_at(1, 1).unwrap().as_number(), Some(10.0));
//! ```

pub mod column;
pub mod error;
pub mod table;
pub mod value;

// Re-exports for convenience
pub use column::ColumnKind;
pub use error::{Error, Result};
pub use table::{FillSummary, Table};
pub use value::{SharedString, StringPool, Value, ValueKey};
