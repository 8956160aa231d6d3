//! # sweeper-chart
//!
//! Chart derivation for sweeper. Charts are a data model for the host UI to
//! render; nothing here draws pixels.

mod axis;
mod chart;
mod error;
mod series;

pub use axis::Axis;
pub use chart::BarChart;
pub use error::{ChartError, ChartResult};
pub use series::Series;
