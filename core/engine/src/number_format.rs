//! FILENAME: core/engine/src/number_format.rs
//! PURPOSE: Number and date conversion utilities for displaying and storing cell values.
//! CONTEXT: Fixed-decimal formatting with thousands separators (used by the
//! template `number_format` filter) and Excel serial date conversion (used by
//! the xlsx reader and writer).

use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Format a number with specified decimal places and an optional thousands separator.
pub fn format_decimal(value: f64, decimal_places: usize, thousands_separator: Option<&str>) -> String {
    let rounded = format!("{:.prec$}", value, prec = decimal_places);

    match thousands_separator {
        Some(sep) if !sep.is_empty() => add_thousands_separator(&rounded, sep),
        _ => rounded,
    }
}

/// Add thousands separators to a numeric string.
pub fn add_thousands_separator(s: &str, separator: &str) -> String {
    let (integer_part, decimal_part) = match s.split_once('.') {
        Some((int, dec)) => (int, Some(dec)),
        None => (s, None),
    };

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push_str(separator);
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Excel day zero. Serial 1 is 1900-01-01 only before the (fictional)
/// 1900-02-29; later dates line up with this epoch.
fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

/// Converts a date/time to an Excel serial number (days since 1899-12-30).
pub fn datetime_to_serial(dt: &NaiveDateTime) -> f64 {
    let elapsed = *dt - excel_epoch();
    elapsed.num_milliseconds() as f64 / 86_400_000.0
}

/// Converts an Excel serial number back to a date/time.
/// Returns None for negative or out-of-range serials.
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 {
        return None;
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    excel_epoch().checked_add_signed(Duration::try_milliseconds(millis)?)
}
