//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the worksheet grid model.
//! CONTEXT: Re-exports the cell, coordinate and grid types that the template
//! engine mutates and the persistence layer loads and saves.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod number_format;

// Re-export commonly used types at the crate root
pub use cell::{Cell, CellError, CellValue};
pub use coord::{col_to_index, coord_to_a1, index_to_col, parse_a1, CellCoord};
pub use grid::{Grid, LineDimension};
pub use number_format::{datetime_to_serial, format_decimal, serial_to_datetime};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_creates_cells() {
        let cell = Cell::new_number(42.0);
        assert_eq!(cell.value, CellValue::Number(42.0));
    }

    #[test]
    fn it_manages_grid() {
        let mut grid = Grid::new();
        let cell = Cell::new_text("Hello".to_string());
        grid.set_cell(1, 1, cell);

        let retrieved = grid.get_cell(1, 1);
        assert!(retrieved.is_some());
        if let Some(c) = retrieved {
            assert_eq!(c.value, CellValue::Text("Hello".to_string()));
        }
    }

    #[test]
    fn cell_values_serialize_to_json() {
        let value = CellValue::Text("abc".to_string());
        let json = serde_json::to_string(&value).unwrap();
        let back: CellValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, value);
    }
}
