//! FILENAME: core/template-engine/src/value.rs
//! PURPOSE: Conversions between evaluator values, JSON and cells.
//! CONTEXT: Values flowing through expressions are `minijinja::Value`s.
//! Render contexts are usually built from JSON; evaluation results are
//! written back to cells as native values (see `to_cell_value`).

use engine::CellValue;
pub use minijinja::Value;
use minijinja::value::ValueKind;

use crate::error::EvalError;

/// Converts a JSON value, keeping integers and floats apart.
pub fn from_json(value: &serde_json::Value) -> Value {
    Value::from_serialize(value)
}

/// Expands an iterable into loop items.
/// Lists yield their elements, maps their keys, strings their characters.
pub fn loop_items(value: &Value) -> Result<Vec<Value>, EvalError> {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None | ValueKind::Bool | ValueKind::Number => {
            Err(EvalError::NotIterable(value.kind().to_string()))
        }
        _ => value
            .try_iter()
            .map(|items| items.collect())
            .map_err(|_| EvalError::NotIterable(value.kind().to_string())),
    }
}

/// Converts an evaluation result into a native cell value.
/// Undefined and none become an empty cell.
pub fn to_cell_value(value: &Value) -> CellValue {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => CellValue::Empty,
        ValueKind::Bool => CellValue::Boolean(value.is_true()),
        ValueKind::Number => match f64::try_from(value.clone()) {
            Ok(number) => CellValue::Number(number),
            Err(_) => CellValue::Text(value.to_string()),
        },
        ValueKind::String => CellValue::Text(value.as_str().unwrap_or_default().to_string()),
        _ => CellValue::Text(value.to_string()),
    }
}
