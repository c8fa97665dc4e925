//! Rectangular input data.
//!
//! A `DataSet` is the (row key, column key) -> value grid every table is
//! built from. It only stores and validates data; labeling, formatting,
//! and layout belong to the table model and the renderers.

use serde::{Deserialize, Serialize};

use crate::error::TableError;
use crate::value::CellValue;
use crate::Result;

/// Column-ordered rectangular data with string row keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSet {
    columns: Vec<String>,
    keys: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl DataSet {
    /// Empty dataset with the given column keys. Column order is display
    /// order; duplicates are rejected.
    pub fn new<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].contains(col) {
                return Err(TableError::DuplicateColumn(col.clone()));
            }
        }
        Ok(Self {
            columns,
            keys: Vec::new(),
            rows: Vec::new(),
        })
    }

    /// Append a row. The value count must match the column count.
    pub fn push_row<I, V>(&mut self, key: impl Into<String>, values: I) -> Result<()>
    where
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let key = key.into();
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        if values.len() != self.columns.len() {
            return Err(TableError::ShapeMismatch {
                key,
                expected: self.columns.len(),
                actual: values.len(),
            });
        }
        self.keys.push(key);
        self.rows.push(values);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn ncolumns(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Iterate rows as (key, values) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[CellValue])> {
        self.keys
            .iter()
            .zip(self.rows.iter())
            .map(|(k, r)| (k.as_str(), r.as_slice()))
    }

    /// Value at (row key, column key), if both exist.
    pub fn get(&self, key: &str, column: &str) -> Option<&CellValue> {
        let row = self.keys.iter().position(|k| k == key)?;
        let col = self.columns.iter().position(|c| c == column)?;
        Some(&self.rows[row][col])
    }

    /// Numeric values of one column, skipping non-numeric cells.
    pub fn numeric_column(&self, column: &str) -> Vec<f64> {
        let Some(col) = self.columns.iter().position(|c| c == column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| row[col].as_f64())
            .collect()
    }

    /// Text values of one column, skipping numeric cells. Used for group
    /// variables.
    pub fn text_column(&self, column: &str) -> Vec<String> {
        let Some(col) = self.columns.iter().position(|c| c == column) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter_map(|row| match &row[col] {
                CellValue::Text(s) => Some(s.clone()),
                CellValue::Int(v) => Some(v.to_string()),
                CellValue::Float(_) => None,
            })
            .collect()
    }

    /// Numeric values of `column` restricted to rows where `by` equals
    /// `group`. This is the slice the mean-difference table feeds to its
    /// significance test.
    pub fn numeric_column_where(&self, column: &str, by: &str, group: &str) -> Vec<f64> {
        let Some(col) = self.columns.iter().position(|c| c == column) else {
            return Vec::new();
        };
        let Some(by_col) = self.columns.iter().position(|c| c == by) else {
            return Vec::new();
        };
        self.rows
            .iter()
            .filter(|row| match &row[by_col] {
                CellValue::Text(s) => s == group,
                CellValue::Int(v) => v.to_string() == group,
                CellValue::Float(_) => false,
            })
            .filter_map(|row| row[col].as_f64())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataSet {
        let mut data = DataSet::new(["a", "b"]).unwrap();
        data.push_row("r1", [CellValue::Int(1), CellValue::Float(2.5)])
            .unwrap();
        data.push_row("r2", [CellValue::Int(3), CellValue::from("x")])
            .unwrap();
        data
    }

    #[test]
    fn test_duplicate_column_rejected() {
        assert!(matches!(
            DataSet::new(["a", "a"]),
            Err(TableError::DuplicateColumn(_))
        ));
    }

    #[test]
    fn test_row_width_validated() {
        let mut data = DataSet::new(["a", "b"]).unwrap();
        let err = data.push_row("r1", [CellValue::Int(1)]);
        assert!(matches!(
            err,
            Err(TableError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_get() {
        let data = sample();
        assert_eq!(data.get("r1", "b"), Some(&CellValue::Float(2.5)));
        assert_eq!(data.get("r3", "b"), None);
        assert_eq!(data.get("r1", "c"), None);
    }

    #[test]
    fn test_numeric_column_skips_text() {
        let data = sample();
        assert_eq!(data.numeric_column("b"), vec![2.5]);
        assert_eq!(data.numeric_column("a"), vec![1.0, 3.0]);
    }

    #[test]
    fn test_numeric_column_where() {
        let mut data = DataSet::new(["v", "group"]).unwrap();
        data.push_row("0", [CellValue::Float(1.0), CellValue::from("X")])
            .unwrap();
        data.push_row("1", [CellValue::Float(2.0), CellValue::from("Y")])
            .unwrap();
        data.push_row("2", [CellValue::Float(3.0), CellValue::from("X")])
            .unwrap();
        assert_eq!(data.numeric_column_where("v", "group", "X"), vec![1.0, 3.0]);
        assert_eq!(data.numeric_column_where("v", "group", "Y"), vec![2.0]);
    }
}
