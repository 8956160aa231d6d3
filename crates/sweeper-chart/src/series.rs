//! Data series types

/// A named series of numeric values for a chart
///
/// Missing cells in the source column appear as NaN so the series stays
/// aligned with row positions; renderers skip NaN bars.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Series {
    /// Series name (the source column name)
    pub name: String,
    /// Values (Y data), one per row
    pub values: Vec<f64>,
}

impl Series {
    /// Create a new data series
    pub fn new<S: Into<String>>(name: S, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}
