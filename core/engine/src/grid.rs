//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: Manages the collection of cells (The Spreadsheet Grid).
//! CONTEXT: This file defines the `Grid` struct which acts as the container
//! for all cell data and per-row / per-column dimension metadata. It uses a
//! sparse storage strategy (HashMap) so that inserting or deleting whole rows
//! and columns only touches populated cells.
//!
//! All positions are 1-based. Row operations never move column metadata and
//! column operations never move row metadata.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, CellValue};
use crate::coord::parse_a1;

static EMPTY_VALUE: CellValue = CellValue::Empty;

/// Size and visibility metadata for a single row or column.
/// `size` is the row height (points) for rows and the column width for columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineDimension {
    pub size: Option<f64>,
    pub hidden: bool,
    pub outline_level: u8,
}

/// The Grid struct holds the state of one worksheet.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Sparse storage: keys are (row, col), values are Cell instances.
    pub cells: HashMap<(u32, u32), Cell>,

    /// Row heights, hidden flags and outline levels keyed by row.
    pub row_dimensions: HashMap<u32, LineDimension>,

    /// Column widths, hidden flags and outline levels keyed by column.
    pub column_dimensions: HashMap<u32, LineDimension>,

    /// Tracks the highest row index currently in use (0 when empty).
    pub max_row: u32,

    /// Tracks the highest column index currently in use (0 when empty).
    pub max_col: u32,
}

impl Grid {
    /// Creates a new, empty Grid.
    pub fn new() -> Self {
        Grid::default()
    }

    /// Sets a cell at the specified coordinates.
    /// Updates max_row/max_col boundaries automatically.
    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) {
        if row > self.max_row {
            self.max_row = row;
        }
        if col > self.max_col {
            self.max_col = col;
        }
        self.cells.insert((row, col), cell);
    }

    /// Replaces the value of a cell, keeping its style.
    pub fn set_value(&mut self, row: u32, col: u32, value: impl Into<CellValue>) {
        let style_index = self.cells.get(&(row, col)).map(|c| c.style_index).unwrap_or(0);
        self.set_cell(
            row,
            col,
            Cell {
                value: value.into(),
                style_index,
            },
        );
    }

    /// Sets a value by A1 reference. Returns false if the reference is invalid.
    pub fn set_a1(&mut self, reference: &str, value: impl Into<CellValue>) -> bool {
        match parse_a1(reference) {
            Some((row, col)) => {
                self.set_value(row, col, value);
                true
            }
            None => false,
        }
    }

    /// Retrieves a reference to a cell at the specified coordinates.
    /// Returns None if the cell is empty (not stored).
    pub fn get_cell(&self, row: u32, col: u32) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Returns the value at the coordinates, `Empty` for unstored cells.
    pub fn value(&self, row: u32, col: u32) -> &CellValue {
        self.cells
            .get(&(row, col))
            .map(|c| &c.value)
            .unwrap_or(&EMPTY_VALUE)
    }

    /// Returns the value at an A1 reference, `Empty` for invalid or unstored cells.
    pub fn value_a1(&self, reference: &str) -> &CellValue {
        match parse_a1(reference) {
            Some((row, col)) => self.value(row, col),
            None => &EMPTY_VALUE,
        }
    }

    /// Removes a cell from the grid (clearing it).
    /// If the cell was at a boundary (max_row or max_col), recalculates bounds.
    pub fn clear_cell(&mut self, row: u32, col: u32) {
        let was_at_boundary = row == self.max_row || col == self.max_col;
        self.cells.remove(&(row, col));

        if was_at_boundary {
            self.recalculate_bounds();
        }
    }

    /// Recalculates max_row and max_col by scanning all cells.
    pub fn recalculate_bounds(&mut self) {
        self.max_row = self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0);
        self.max_col = self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0);
    }

    // ========================================================================
    // STRUCTURAL CHANGES
    // ========================================================================

    /// Inserts `count` empty rows before `at`, shifting rows at or below down.
    pub fn insert_rows(&mut self, at: u32, count: u32) {
        if count == 0 {
            return;
        }
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .map(|((r, c), cell)| ((shift_for_insert(r, at, count), c), cell))
            .collect();
        shift_dimensions_for_insert(&mut self.row_dimensions, at, count);
        self.recalculate_bounds();
    }

    /// Deletes `count` rows starting at `at`, shifting rows below up.
    pub fn delete_rows(&mut self, at: u32, count: u32) {
        if count == 0 {
            return;
        }
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .filter_map(|((r, c), cell)| shift_for_delete(r, at, count).map(|r| ((r, c), cell)))
            .collect();
        shift_dimensions_for_delete(&mut self.row_dimensions, at, count);
        self.recalculate_bounds();
    }

    /// Inserts `count` empty columns before `at`, shifting columns at or right of it.
    pub fn insert_cols(&mut self, at: u32, count: u32) {
        if count == 0 {
            return;
        }
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .map(|((r, c), cell)| ((r, shift_for_insert(c, at, count)), cell))
            .collect();
        shift_dimensions_for_insert(&mut self.column_dimensions, at, count);
        self.recalculate_bounds();
    }

    /// Deletes `count` columns starting at `at`, shifting columns to the right left.
    pub fn delete_cols(&mut self, at: u32, count: u32) {
        if count == 0 {
            return;
        }
        let cells = std::mem::take(&mut self.cells);
        self.cells = cells
            .into_iter()
            .filter_map(|((r, c), cell)| shift_for_delete(c, at, count).map(|c| ((r, c), cell)))
            .collect();
        shift_dimensions_for_delete(&mut self.column_dimensions, at, count);
        self.recalculate_bounds();
    }

    // ========================================================================
    // COPY HELPERS
    // ========================================================================

    /// Copies value and style from one cell to another.
    /// Copying an unstored cell clears the target.
    pub fn copy_cell(&mut self, src: (u32, u32), dst: (u32, u32)) {
        match self.cells.get(&src).cloned() {
            Some(cell) => self.set_cell(dst.0, dst.1, cell),
            None => self.clear_cell(dst.0, dst.1),
        }
    }

    /// Copies height, hidden flag and outline level from one row to another.
    pub fn copy_row_dimension(&mut self, src: u32, dst: u32) {
        copy_dimension(&mut self.row_dimensions, src, dst);
    }

    /// Copies width, hidden flag and outline level from one column to another.
    pub fn copy_column_dimension(&mut self, src: u32, dst: u32) {
        copy_dimension(&mut self.column_dimensions, src, dst);
    }

    pub fn row_dimension(&self, row: u32) -> Option<&LineDimension> {
        self.row_dimensions.get(&row)
    }

    pub fn column_dimension(&self, col: u32) -> Option<&LineDimension> {
        self.column_dimensions.get(&col)
    }

    pub fn row_dimension_mut(&mut self, row: u32) -> &mut LineDimension {
        self.row_dimensions.entry(row).or_default()
    }

    pub fn column_dimension_mut(&mut self, col: u32) -> &mut LineDimension {
        self.column_dimensions.entry(col).or_default()
    }
}

fn shift_for_insert(pos: u32, at: u32, count: u32) -> u32 {
    if pos >= at {
        pos + count
    } else {
        pos
    }
}

/// Returns the new position, or None if `pos` falls inside the deleted range.
fn shift_for_delete(pos: u32, at: u32, count: u32) -> Option<u32> {
    let delete_end = at + count;
    if pos >= delete_end {
        Some(pos - count)
    } else if pos >= at {
        None
    } else {
        Some(pos)
    }
}

fn shift_dimensions_for_insert(dims: &mut HashMap<u32, LineDimension>, at: u32, count: u32) {
    let old = std::mem::take(dims);
    *dims = old
        .into_iter()
        .map(|(pos, dim)| (shift_for_insert(pos, at, count), dim))
        .collect();
}

fn shift_dimensions_for_delete(dims: &mut HashMap<u32, LineDimension>, at: u32, count: u32) {
    let old = std::mem::take(dims);
    *dims = old
        .into_iter()
        .filter_map(|(pos, dim)| shift_for_delete(pos, at, count).map(|p| (p, dim)))
        .collect();
}

fn copy_dimension(dims: &mut HashMap<u32, LineDimension>, src: u32, dst: u32) {
    match dims.get(&src).cloned() {
        Some(dim) => {
            dims.insert(dst, dim);
        }
        None => {
            dims.remove(&dst);
        }
    }
}
