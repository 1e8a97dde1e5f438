//! FILENAME: core/template-engine/src/filters.rs
//! PURPOSE: Spreadsheet filters registered on top of minijinja's built-ins.
//! CONTEXT: `upper`, `lower`, `title`, `round`, `int`, `default`, `length`
//! and the rest come from minijinja. The two filters here format values the
//! way report cells usually want them.
//!
//! Dates reach the evaluator in their serde form (ISO 8601 strings such as
//! `2024-03-15T10:30:00`), so `date` parses that text before formatting.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use engine::format_decimal;
use minijinja::value::ValueKind;
use minijinja::{Error, ErrorKind, Value};

pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_INPUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    DATETIME_INPUTS
        .iter()
        .find_map(|input| NaiveDateTime::parse_from_str(text, input).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// `value | date(fmt="%Y-%m-%d")`: strftime formatting. Anything that is not
/// a date passes through as text.
pub fn date(value: Value, format: Option<String>) -> Result<String, Error> {
    let Some(dt) = value.as_str().and_then(parse_datetime) else {
        return Ok(value.to_string());
    };

    let format = format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::new(
            ErrorKind::InvalidOperation,
            format!("invalid date format '{}'", format),
        ));
    }

    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.into_iter())).map_err(|_| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("cannot format date with '{}'", format),
        )
    })?;
    Ok(out)
}

/// `value | number_format(decimals=2, thousands=",")`: fixed decimals.
/// Digits are grouped only when `thousands` is `","`; any other value turns
/// grouping off. Non-numbers pass through as text.
pub fn number_format(
    value: Value,
    decimals: Option<i64>,
    thousands: Option<String>,
) -> Result<String, Error> {
    if value.kind() != ValueKind::Number {
        return Ok(value.to_string());
    }
    let number = f64::try_from(value)?;

    let decimals = usize::try_from(decimals.unwrap_or(2)).map_err(|_| {
        Error::new(ErrorKind::InvalidOperation, "decimals must not be negative")
    })?;
    let grouped = thousands.as_deref().unwrap_or(",") == ",";

    Ok(format_decimal(number, decimals, grouped.then_some(",")))
}
