//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the fundamental data structures for a single spreadsheet cell.
//! CONTEXT: This file contains the `Cell` struct and `CellValue` enum.
//! A cell carries a typed value plus an opaque style index; the template
//! engine copies both verbatim when it duplicates rows or columns.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Represents the possible errors a cell can hold (e.g., #DIV/0!)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellError {
    Div0,  // Division by zero
    Ref,   // Invalid reference
    Name,  // Unknown function name
    Value, // Wrong type of argument
    NA,    // Value not available
    Null,  // Empty intersection
    Num,   // Invalid numeric value
}

/// Represents the raw data within a cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Error(CellError),
}

impl CellValue {
    /// Returns the text content if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Boolean(value)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(value: NaiveDateTime) -> Self {
        CellValue::DateTime(value)
    }
}

/// The atomic unit of the spreadsheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub value: CellValue,
    pub style_index: usize,
}

impl Cell {
    pub fn new() -> Self {
        Cell {
            value: CellValue::Empty,
            style_index: 0,
        }
    }

    pub fn new_number(num: f64) -> Self {
        Cell {
            value: CellValue::Number(num),
            style_index: 0,
        }
    }

    pub fn new_text(text: String) -> Self {
        Cell {
            value: CellValue::Text(text),
            style_index: 0,
        }
    }

    pub fn new_boolean(value: bool) -> Self {
        Cell {
            value: CellValue::Boolean(value),
            style_index: 0,
        }
    }

    /// Builder-style helper used when a style must travel with the value.
    pub fn with_style(mut self, style_index: usize) -> Self {
        self.style_index = style_index;
        self
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match &self.value {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => {
                if *b { "TRUE" } else { "FALSE" }.to_string()
            }
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Error(e) => format!("#{:?}", e).to_uppercase(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::new()
    }
}
