// In-memory table built from an uploaded file

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{AppError, Result};

/// Tokens treated as missing values on load
pub const MISSING_TOKENS: [&str; 4] = ["NA", "NaN", "null", "None"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Missing,
}

impl Cell {
    /// Interprets a raw CSV field
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || MISSING_TOKENS.contains(&trimmed) {
            return Cell::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => Cell::Number(n),
            _ => Cell::Text(trimmed.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }
}

// Integral numbers print without a trailing ".0"
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => Ok(()),
        }
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Cell::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => serializer.serialize_i64(*n as i64),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Missing => serializer.serialize_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColumnType {
    #[serde(rename = "int64")]
    Integer,
    #[serde(rename = "float64")]
    Float,
    #[serde(rename = "object")]
    Text,
}

impl ColumnType {
    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnType::Text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Cell>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn dtype(&self) -> ColumnType {
        let mut present = self.values.iter().filter(|c: &&Cell| !c.is_missing()).peekable();
        if present.peek().is_none() {
            return ColumnType::Text;
        }

        let mut integral = true;
        for cell in present {
            match cell {
                Cell::Number(n) => integral &= n.fract() == 0.0,
                _ => return ColumnType::Text,
            }
        }

        if integral { ColumnType::Integer } else { ColumnType::Float }
    }

    /// Non-missing numeric values in row order
    pub fn numbers(&self) -> Vec<f64> {
        self.values.iter().filter_map(Cell::as_number).collect()
    }

    pub fn missing(&self) -> usize {
        self.values.iter().filter(|c: &&Cell| c.is_missing()).count()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataFrame {
    pub columns: Vec<Column>,
}

impl DataFrame {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if let Some(first) = columns.first() {
            let rows = first.values.len();
            if let Some(bad) = columns.iter().find(|c: &&Column| c.values.len() != rows) {
                return Err(AppError::InvalidInput(format!(
                    "column '{}' has {} values, expected {}",
                    bad.name,
                    bad.values.len(),
                    rows
                )));
            }
        }
        Ok(Self { columns })
    }

    pub fn height(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn require(&self, name: &str) -> Result<&Column> {
        self.column(name)
            .ok_or_else(|| AppError::ColumnNotFound(name.to_string()))
    }

    /// Like `require`, but also rejects non-numeric columns
    pub fn require_numeric(&self, name: &str) -> Result<&Column> {
        let column = self.require(name)?;
        if !column.dtype().is_numeric() {
            return Err(AppError::NotNumeric(name.to_string()));
        }
        Ok(column)
    }

    /// Keeps the rows whose mask entry is true
    pub fn select_rows(&self, mask: &[bool]) -> Self {
        let columns = self
            .columns
            .iter()
            .map(|c| Column {
                name: c.name.clone(),
                values: c
                    .values
                    .iter()
                    .zip(mask)
                    .filter(|(_, keep)| **keep)
                    .map(|(v, _)| v.clone())
                    .collect(),
            })
            .collect();
        Self { columns }
    }

    /// Rows as JSON objects keyed by column name
    pub fn records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        (0..self.height())
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| {
                        let value = serde_json::to_value(&c.values[row]).unwrap_or(serde_json::Value::Null);
                        (c.name.clone(), value)
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_text_and_missing() {
        assert_eq!(Cell::parse(" 42 "), Cell::Number(42.0));
        assert_eq!(Cell::parse("3.5"), Cell::Number(3.5));
        assert_eq!(Cell::parse("blue"), Cell::Text("blue".into()));
        assert_eq!(Cell::parse(""), Cell::Missing);
        assert_eq!(Cell::parse("NA"), Cell::Missing);
        assert_eq!(Cell::parse("None"), Cell::Missing);
        // "inf" parses as f64 but is not a usable value
        assert_eq!(Cell::parse("inf"), Cell::Text("inf".into()));
    }

    #[test]
    fn infers_column_types() {
        let ints = Column::new("a", vec![Cell::Number(1.0), Cell::Missing, Cell::Number(3.0)]);
        let floats = Column::new("b", vec![Cell::Number(1.5), Cell::Number(2.0)]);
        let mixed = Column::new("c", vec![Cell::Number(1.0), Cell::Text("x".into())]);
        let empty = Column::new("d", vec![Cell::Missing, Cell::Missing]);

        assert_eq!(ints.dtype(), ColumnType::Integer);
        assert_eq!(floats.dtype(), ColumnType::Float);
        assert_eq!(mixed.dtype(), ColumnType::Text);
        assert_eq!(empty.dtype(), ColumnType::Text);
    }

    #[test]
    fn rejects_ragged_columns() {
        let result = DataFrame::new(vec![
            Column::new("a", vec![Cell::Number(1.0)]),
            Column::new("b", vec![]),
        ]);
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn display_drops_integral_fraction() {
        assert_eq!(Cell::Number(7.0).to_string(), "7");
        assert_eq!(Cell::Number(7.25).to_string(), "7.25");
        assert_eq!(Cell::Missing.to_string(), "");
    }

    #[test]
    fn require_numeric_reports_the_right_error() {
        let df = DataFrame::new(vec![Column::new("name", vec![Cell::Text("x".into())])]).unwrap();
        assert!(matches!(df.require("nope"), Err(AppError::ColumnNotFound(_))));
        assert!(matches!(df.require_numeric("name"), Err(AppError::NotNumeric(_))));
    }
}
