//! Bar chart model and derivation

use crate::axis::Axis;
use crate::error::{ChartError, ChartResult};
use crate::series::Series;
use sweeper_core::Table;

/// A bar chart: series of values plotted against row position
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct BarChart {
    /// Chart title
    pub title: Option<String>,
    /// Category labels (row positions, 0-based)
    pub categories: Vec<usize>,
    /// Data series, one bar group per category
    pub series: Vec<Series>,
    /// Category axis (X)
    pub category_axis: Axis,
    /// Value axis (Y)
    pub value_axis: Axis,
}

impl BarChart {
    /// Derive a bar chart from the first two numeric columns of a table
    ///
    /// Read-only: the table is not modified. Fails with
    /// [`ChartError::NotEnoughNumericColumns`] when fewer than two numeric
    /// columns exist.
    pub fn from_table(table: &Table) -> ChartResult<BarChart> {
        let numeric = table.numeric_columns();
        if numeric.len() < 2 {
            return Err(ChartError::NotEnoughNumericColumns {
                found: numeric.len(),
            });
        }

        let mut series = Vec::with_capacity(2);
        for &col in &numeric[..2] {
            let name = table.column_names()[col].clone();
            let values = table
                .column_values(col)?
                .map(|v| v.as_number().unwrap_or(f64::NAN))
                .collect();
            series.push(Series::new(name, values));
        }

        Ok(BarChart {
            title: None,
            categories: (0..table.row_count()).collect(),
            series,
            category_axis: Axis::new().with_title("row"),
            value_axis: Axis::new(),
        })
    }

    /// Set chart title
    pub fn with_title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::Value;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        let mut t = Table::new(columns.iter().map(|s| s.to_string()).collect()).unwrap();
        for row in rows {
            t.push_row(row).unwrap();
        }
        t
    }

    #[test]
    fn test_from_table_first_two_numeric() {
        let t = table(
            &["label", "a", "b", "c"],
            vec![
                vec!["x".into(), 1.0.into(), 10.0.into(), 100.0.into()],
                vec!["y".into(), 2.0.into(), 20.0.into(), 200.0.into()],
            ],
        );

        let chart = BarChart::from_table(&t).unwrap();
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].name, "a");
        assert_eq!(chart.series[1].name, "b");
        assert_eq!(chart.series[0].values, vec![1.0, 2.0]);
        assert_eq!(chart.categories, vec![0, 1]);
    }

    #[test]
    fn test_from_table_missing_becomes_nan() {
        let t = table(
            &["a", "b"],
            vec![
                vec![1.0.into(), 10.0.into()],
                vec![Value::Missing, 20.0.into()],
            ],
        );

        let chart = BarChart::from_table(&t).unwrap();
        assert!(chart.series[0].values[1].is_nan());
    }

    #[test]
    fn test_from_table_not_enough_numeric() {
        let t = table(
            &["label", "a"],
            vec![vec!["x".into(), 1.0.into()]],
        );

        let err = BarChart::from_table(&t).unwrap_err();
        assert!(matches!(
            err,
            ChartError::NotEnoughNumericColumns { found: 1 }
        ));
    }
}
