//! FILENAME: core/template-engine/src/expander.rs
//! PURPOSE: Duplicates and removes whole rows or columns.
//! CONTEXT: A for-block body is expanded by inserting (n - 1) copies right
//! after the original body, which stays in place as iteration 0. Each copy
//! gets the template line's size/visibility metadata and every cell's value
//! and style, unrendered tags included.

use crate::directive::Axis;
use crate::sheet_grid::{cell_at, cross_count, SheetGrid};

fn insert_lines<G: SheetGrid + ?Sized>(grid: &mut G, axis: Axis, at: u32, count: u32) {
    match axis {
        Axis::Row => grid.insert_rows(at, count),
        Axis::Column => grid.insert_cols(at, count),
    }
}

fn delete_lines<G: SheetGrid + ?Sized>(grid: &mut G, axis: Axis, at: u32, count: u32) {
    match axis {
        Axis::Row => grid.delete_rows(at, count),
        Axis::Column => grid.delete_cols(at, count),
    }
}

fn copy_line_metadata<G: SheetGrid + ?Sized>(grid: &mut G, axis: Axis, src: u32, dst: u32) {
    match axis {
        Axis::Row => grid.copy_row_metadata(src, dst),
        Axis::Column => grid.copy_col_metadata(src, dst),
    }
}

/// Duplicates `body_start..=body_end` so that it appears `iterations` times.
/// Returns the number of lines inserted (0 when `iterations <= 1`).
pub fn expand_for_loop<G: SheetGrid + ?Sized>(
    grid: &mut G,
    axis: Axis,
    body_start: u32,
    body_end: u32,
    iterations: usize,
) -> u32 {
    if iterations <= 1 || body_end < body_start {
        return 0;
    }

    let body_len = body_end - body_start + 1;
    let copies = (iterations - 1) as u32;
    let to_insert = copies * body_len;

    insert_lines(grid, axis, body_end + 1, to_insert);

    let cross = cross_count(grid, axis);
    for iteration in 0..copies {
        for offset in 0..body_len {
            let src = body_start + offset;
            let dst = body_end + 1 + iteration * body_len + offset;

            copy_line_metadata(grid, axis, src, dst);
            for c in 1..=cross {
                grid.copy_cell(cell_at(axis, src, c), cell_at(axis, dst, c));
            }
        }
    }

    to_insert
}

/// Deletes `start..=end`. Returns the (negative) change in line count.
pub fn remove_lines<G: SheetGrid + ?Sized>(grid: &mut G, axis: Axis, start: u32, end: u32) -> i64 {
    if end < start {
        return 0;
    }
    let count = end - start + 1;
    delete_lines(grid, axis, start, count);
    -(count as i64)
}
