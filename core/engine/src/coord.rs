//! FILENAME: core/engine/src/coord.rs
//! PURPOSE: Utilities for converting between spreadsheet coordinate formats.
//! CONTEXT: This module converts between A1-style notation (e.g., "A1", "AA100")
//! and the 1-based (row, col) indices used by the grid.
//! Column "A" = 1, "B" = 2, ..., "Z" = 26, "AA" = 27, etc.

/// A cell coordinate as (row, col) with 1-based indices.
pub type CellCoord = (u32, u32);

/// Converts a column string (e.g., "A", "AA", "ABC") to a 1-based column index.
/// "A" -> 1, "B" -> 2, ..., "Z" -> 26, "AA" -> 27, etc.
///
/// Returns None if the string is empty or contains non-alphabetic characters.
pub fn col_to_index(col_str: &str) -> Option<u32> {
    if col_str.is_empty() {
        return None;
    }
    let mut result: u32 = 0;
    for c in col_str.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        result = result.checked_mul(26)?.checked_add(digit)?;
    }
    Some(result)
}

/// Converts a 1-based column index to a column string.
/// 1 -> "A", 2 -> "B", ..., 26 -> "Z", 27 -> "AA", etc.
/// Index 0 has no letter form and yields an empty string.
pub fn index_to_col(col_index: u32) -> String {
    let mut result = String::new();
    let mut n = col_index;
    while n > 0 {
        let remainder = (n - 1) % 26;
        result.insert(0, (b'A' + remainder as u8) as char);
        n = (n - 1) / 26;
    }
    result
}

/// Parses an A1-style reference ("B3", "aa100") into a 1-based (row, col) coordinate.
pub fn parse_a1(reference: &str) -> Option<CellCoord> {
    let reference = reference.trim();
    let split = reference.find(|c: char| c.is_ascii_digit())?;
    let (col_part, row_part) = reference.split_at(split);
    let col = col_to_index(col_part)?;
    let row: u32 = row_part.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row, col))
}

/// Converts a 1-based (row, col) coordinate to an A1-style reference string.
/// (1, 1) -> "A1", (2, 2) -> "B2", (100, 27) -> "AA100"
pub fn coord_to_a1(row: u32, col: u32) -> String {
    format!("{}{}", index_to_col(col), row)
}
