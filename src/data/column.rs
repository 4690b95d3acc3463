//! Named column of cell values.

use super::value::Value;
use crate::error::{Result, TabError};
use serde::{Deserialize, Serialize};

/// Inferred type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Every present value is a number.
    Numeric,
    /// At least one present value is text.
    Text,
}

/// A named, ordered sequence of values, possibly containing missing markers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    name: String,
    values: Vec<Value>,
    column_type: ColumnType,
}

impl Column {
    /// Create a column, inferring its type from the values.
    ///
    /// A column with no present values is numeric.
    pub fn new(name: &str, values: Vec<Value>) -> Self {
        let column_type = if values.iter().all(|v| !matches!(v, Value::Text(_))) {
            ColumnType::Numeric
        } else {
            ColumnType::Text
        };
        Self {
            name: name.to_string(),
            values,
            column_type,
        }
    }

    /// Create a numeric column; `None` entries are missing.
    pub fn from_numbers(name: &str, values: &[Option<f64>]) -> Self {
        let values = values
            .iter()
            .map(|v| match v {
                Some(x) => Value::Number(*x),
                None => Value::Missing,
            })
            .collect();
        Self::new(name, values)
    }

    /// Create a text column; `None` entries are missing.
    pub fn from_text(name: &str, values: &[Option<&str>]) -> Self {
        let values = values
            .iter()
            .map(|v| match v {
                Some(s) => Value::Text(s.to_string()),
                None => Value::Missing,
            })
            .collect();
        Self::new(name, values)
    }

    /// Build a column from raw text fields, coercing to numbers when every
    /// present field parses as a finite number.
    pub fn from_raw(name: &str, raw: &[String]) -> Self {
        let parsed: Vec<Value> = raw.iter().map(|s| Value::parse_raw(s)).collect();
        let all_numeric = parsed.iter().all(|v| match v {
            Value::Text(s) => parse_finite(s).is_some(),
            _ => true,
        });
        if !all_numeric {
            return Self::new(name, parsed);
        }
        let values = parsed
            .into_iter()
            .map(|v| match v {
                Value::Text(s) => parse_finite(&s).map(Value::Number).unwrap_or(Value::Missing),
                other => other,
            })
            .collect();
        Self::new(name, values)
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return a copy of this column under a different name.
    pub fn renamed(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            values: self.values.clone(),
            column_type: self.column_type,
        }
    }

    /// All values in record order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value at a position.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Number of values (including missing).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Inferred column type.
    pub fn column_type(&self) -> ColumnType {
        self.column_type
    }

    /// Check if numeric.
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }

    /// Number of missing values.
    pub fn n_missing(&self) -> usize {
        self.values.iter().filter(|v| v.is_missing()).count()
    }

    /// Number of present values.
    pub fn n_present(&self) -> usize {
        self.len() - self.n_missing()
    }

    /// Iterate over values.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// Numeric view of the column, `None` for missing entries.
    pub fn numbers(&self) -> Result<Vec<Option<f64>>> {
        if !self.is_numeric() {
            return Err(TabError::NonNumericColumn(self.name.clone()));
        }
        Ok(self.values.iter().map(|v| v.as_number()).collect())
    }

    /// Present numeric values only.
    pub fn present_numbers(&self) -> Result<Vec<f64>> {
        Ok(self.numbers()?.into_iter().flatten().collect())
    }

    /// Category keys in record order, `None` for missing entries.
    pub fn categories(&self) -> Vec<Option<String>> {
        self.values.iter().map(|v| v.category()).collect()
    }

    /// Keep only the values at the given positions, in that order.
    pub fn subset(&self, indices: &[usize]) -> Self {
        let values = indices
            .iter()
            .filter_map(|&i| self.values.get(i).cloned())
            .collect();
        Self {
            name: self.name.clone(),
            values,
            column_type: self.column_type,
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_numeric() {
        let raw: Vec<String> = vec!["22".into(), "".into(), "38.5".into()];
        let col = Column::from_raw("Age", &raw);
        assert!(col.is_numeric());
        assert_eq!(col.numbers().unwrap(), vec![Some(22.0), None, Some(38.5)]);
        assert_eq!(col.n_missing(), 1);
        assert_eq!(col.n_present(), 2);
    }

    #[test]
    fn test_from_raw_text() {
        let raw: Vec<String> = vec!["S".into(), "C".into(), "".into(), "3".into()];
        let col = Column::from_raw("Embarked", &raw);
        assert_eq!(col.column_type(), ColumnType::Text);
        assert!(col.get(2).unwrap().is_missing());
        assert_eq!(col.get(3).unwrap().as_text(), Some("3"));
    }

    #[test]
    fn test_from_raw_missing_tokens_any_case() {
        let raw: Vec<String> = vec!["20".into(), "nan".into(), "NA".into(), "30".into()];
        let col = Column::from_raw("Age", &raw);
        assert!(col.is_numeric());
        assert_eq!(col.n_missing(), 2);
        assert_eq!(col.numbers().unwrap(), vec![Some(20.0), None, None, Some(30.0)]);
    }

    #[test]
    fn test_from_raw_infinity_stays_text() {
        let raw: Vec<String> = vec!["1".into(), "inf".into()];
        let col = Column::from_raw("x", &raw);
        assert_eq!(col.column_type(), ColumnType::Text);
        assert_eq!(col.get(1).unwrap().as_text(), Some("inf"));
    }

    #[test]
    fn test_numbers_on_text_column() {
        let col = Column::from_text("Embarked", &[Some("S"), Some("C")]);
        assert!(matches!(col.numbers(), Err(TabError::NonNumericColumn(_))));
    }

    #[test]
    fn test_all_missing_is_numeric() {
        let col = Column::from_numbers("Cabin", &[None, None]);
        assert!(col.is_numeric());
    }

    #[test]
    fn test_subset() {
        let col = Column::from_numbers("x", &[Some(1.0), Some(2.0), Some(3.0)]);
        let sub = col.subset(&[2, 0]);
        assert_eq!(sub.numbers().unwrap(), vec![Some(3.0), Some(1.0)]);
    }
}
