//! Column kind inference

use crate::value::Value;

/// The inferred kind of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ColumnKind {
    /// Every value is a number or missing, with at least one number
    Numeric,
    /// At least one text value
    Text,
    /// Every value is missing (or the table has no rows)
    Empty,
}

impl ColumnKind {
    /// Infer the kind of a column from its values.
    ///
    /// A single text value makes the whole column `Text`; missing values
    /// never change the kind on their own.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut saw_number = false;
        for value in values {
            match value {
                Value::Number(_) => saw_number = true,
                Value::Missing => {}
                Value::Text(_) => return ColumnKind::Text,
            }
        }
        if saw_number {
            ColumnKind::Numeric
        } else {
            ColumnKind::Empty
        }
    }

    /// Check if this is a numeric column
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_numeric() {
        let values = vec![Value::Number(1.0), Value::Missing, Value::Number(3.0)];
        assert_eq!(ColumnKind::infer(&values), ColumnKind::Numeric);
    }

    #[test]
    fn test_infer_text_wins() {
        let values = vec![Value::Number(1.0), Value::text("x")];
        assert_eq!(ColumnKind::infer(&values), ColumnKind::Text);
    }

    #[test]
    fn test_infer_empty() {
        assert_eq!(ColumnKind::infer(&[]), ColumnKind::Empty);
        let values = vec![Value::Missing, Value::Missing];
        assert_eq!(ColumnKind::infer(&values), ColumnKind::Empty);
    }
}
