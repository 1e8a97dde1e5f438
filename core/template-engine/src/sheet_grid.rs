//! FILENAME: core/template-engine/src/sheet_grid.rs
//! PURPOSE: The grid operations the expansion engine needs.
//! CONTEXT: The engine never touches storage directly. It reads cell text,
//! writes rendered values, inserts and deletes whole lines, and copies cells
//! and line metadata through this trait. `engine::Grid` implements it.
//! All positions are 1-based.

use engine::{CellValue, Grid};

use crate::directive::Axis;

pub trait SheetGrid {
    fn cell_value(&self, row: u32, col: u32) -> &CellValue;

    /// Replaces a cell's value, keeping its style.
    fn set_cell_value(&mut self, row: u32, col: u32, value: CellValue);

    fn insert_rows(&mut self, at: u32, count: u32);
    fn delete_rows(&mut self, at: u32, count: u32);
    fn insert_cols(&mut self, at: u32, count: u32);
    fn delete_cols(&mut self, at: u32, count: u32);

    /// Copies height, visibility and outline level.
    fn copy_row_metadata(&mut self, src: u32, dst: u32);

    /// Copies width, visibility and outline level.
    fn copy_col_metadata(&mut self, src: u32, dst: u32);

    /// Copies value and style. `src` and `dst` are `(row, col)`.
    fn copy_cell(&mut self, src: (u32, u32), dst: (u32, u32));

    fn max_row(&self) -> u32;
    fn max_column(&self) -> u32;

    /// Text content of a cell, if it holds text.
    fn cell_text(&self, row: u32, col: u32) -> Option<&str> {
        self.cell_value(row, col).as_text()
    }
}

// ============================================================================
// AXIS HELPERS
// ============================================================================

/// Number of lines along `axis` (rows for Row, columns for Column).
pub(crate) fn line_count<G: SheetGrid + ?Sized>(grid: &G, axis: Axis) -> u32 {
    match axis {
        Axis::Row => grid.max_row(),
        Axis::Column => grid.max_column(),
    }
}

/// Number of cells on each line along `axis`.
pub(crate) fn cross_count<G: SheetGrid + ?Sized>(grid: &G, axis: Axis) -> u32 {
    match axis {
        Axis::Row => grid.max_column(),
        Axis::Column => grid.max_row(),
    }
}

/// Maps (line, cross) positions to a `(row, col)` pair.
pub(crate) fn cell_at(axis: Axis, line: u32, cross: u32) -> (u32, u32) {
    match axis {
        Axis::Row => (line, cross),
        Axis::Column => (cross, line),
    }
}

impl SheetGrid for Grid {
    fn cell_value(&self, row: u32, col: u32) -> &CellValue {
        self.value(row, col)
    }

    fn set_cell_value(&mut self, row: u32, col: u32, value: CellValue) {
        self.set_value(row, col, value);
    }

    fn insert_rows(&mut self, at: u32, count: u32) {
        Grid::insert_rows(self, at, count);
    }

    fn delete_rows(&mut self, at: u32, count: u32) {
        Grid::delete_rows(self, at, count);
    }

    fn insert_cols(&mut self, at: u32, count: u32) {
        Grid::insert_cols(self, at, count);
    }

    fn delete_cols(&mut self, at: u32, count: u32) {
        Grid::delete_cols(self, at, count);
    }

    fn copy_row_metadata(&mut self, src: u32, dst: u32) {
        self.copy_row_dimension(src, dst);
    }

    fn copy_col_metadata(&mut self, src: u32, dst: u32) {
        self.copy_column_dimension(src, dst);
    }

    fn copy_cell(&mut self, src: (u32, u32), dst: (u32, u32)) {
        Grid::copy_cell(self, src, dst);
    }

    fn max_row(&self) -> u32 {
        self.max_row
    }

    fn max_column(&self) -> u32 {
        self.max_col
    }
}
