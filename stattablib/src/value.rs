//! Scalar cell values.
//!
//! Source data for a table is a grid of scalars: integers, floats, or
//! already-formatted text. `CellValue` is the common currency between
//! datasets, formatters, and the row materializer. Numbers go through the
//! active formatter when rows are materialized; text passes through
//! unchanged.

use serde::{Deserialize, Serialize};

/// A single raw cell: a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Text passes through formatting unchanged
    Text(String),
}

impl CellValue {
    /// True for `Int` and `Float` values.
    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Int(_) | CellValue::Float(_))
    }

    /// Numeric view of the value, if it has one.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(*v as f64),
            CellValue::Float(v) => Some(*v),
            CellValue::Text(_) => None,
        }
    }

    /// Parse a string the way CSV input is interpreted: integer, then
    /// float, then text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(v) = raw.parse::<i64>() {
            return CellValue::Int(v);
        }
        if let Ok(v) = raw.parse::<f64>() {
            return CellValue::Float(v);
        }
        CellValue::Text(raw.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Int(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int() {
        assert_eq!(CellValue::parse("42"), CellValue::Int(42));
        assert_eq!(CellValue::parse("-7"), CellValue::Int(-7));
    }

    #[test]
    fn test_parse_float() {
        assert_eq!(CellValue::parse("1.5"), CellValue::Float(1.5));
        assert_eq!(CellValue::parse("-0.25"), CellValue::Float(-0.25));
    }

    #[test]
    fn test_parse_text() {
        assert_eq!(
            CellValue::parse("hello"),
            CellValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_as_f64() {
        assert_eq!(CellValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(CellValue::Float(2.5).as_f64(), Some(2.5));
        assert_eq!(CellValue::from("x").as_f64(), None);
    }

    #[test]
    fn test_is_numeric() {
        assert!(CellValue::Int(1).is_numeric());
        assert!(CellValue::Float(1.0).is_numeric());
        assert!(!CellValue::from("1").is_numeric());
    }
}
