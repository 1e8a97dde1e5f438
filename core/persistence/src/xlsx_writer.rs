//! FILENAME: core/persistence/src/xlsx_writer.rs

use crate::{PersistenceError, Workbook};
use engine::cell::{CellError, CellValue};
use engine::datetime_to_serial;
use engine::grid::Grid;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use std::path::Path;

/// Number format applied to `DateTime` cells, which are stored as serials.
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

pub fn save_xlsx(workbook: &Workbook, path: &Path) -> Result<(), PersistenceError> {
    let mut xlsx = XlsxWorkbook::new();
    let date_format = Format::new().set_num_format(DATETIME_FORMAT);

    for sheet in &workbook.sheets {
        let worksheet = xlsx.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        write_dimensions(worksheet, &sheet.grid)?;

        // Write cells (xlsx positions are 0-based)
        for (&(row, col), cell) in &sheet.grid.cells {
            let (row, col) = to_xlsx_position(row, col)?;
            match &cell.value {
                CellValue::Empty => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row, col, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
                CellValue::Boolean(b) => {
                    worksheet.write_boolean(row, col, *b)?;
                }
                CellValue::DateTime(dt) => {
                    worksheet.write_number_with_format(
                        row,
                        col,
                        datetime_to_serial(dt),
                        &date_format,
                    )?;
                }
                CellValue::Error(e) => {
                    worksheet.write_string(row, col, error_text(e))?;
                }
            }
        }

        log::debug!(
            "[PERSISTENCE] wrote sheet '{}': {} cell(s)",
            sheet.name,
            sheet.grid.cells.len()
        );
    }

    xlsx.save(path)?;
    Ok(())
}

/// Row heights (points), column widths (characters) and hidden flags.
fn write_dimensions(worksheet: &mut Worksheet, grid: &Grid) -> Result<(), PersistenceError> {
    for (&row, dim) in &grid.row_dimensions {
        let (row, _) = to_xlsx_position(row, 1)?;
        if let Some(height) = dim.size {
            worksheet.set_row_height(row, height)?;
        }
        if dim.hidden {
            worksheet.set_row_hidden(row)?;
        }
    }

    for (&col, dim) in &grid.column_dimensions {
        let (_, col) = to_xlsx_position(1, col)?;
        if let Some(width) = dim.size {
            worksheet.set_column_width(col, width)?;
        }
        if dim.hidden {
            worksheet.set_column_hidden(col)?;
        }
    }

    Ok(())
}

fn to_xlsx_position(row: u32, col: u32) -> Result<(u32, u16), PersistenceError> {
    let out_of_range = || PersistenceError::CellOutOfRange { row, col };
    let xlsx_row = row.checked_sub(1).ok_or_else(out_of_range)?;
    let xlsx_col = col
        .checked_sub(1)
        .and_then(|c| u16::try_from(c).ok())
        .ok_or_else(out_of_range)?;
    Ok((xlsx_row, xlsx_col))
}

fn error_text(error: &CellError) -> &'static str {
    match error {
        CellError::Div0 => "#DIV/0!",
        CellError::Ref => "#REF!",
        CellError::Name => "#NAME?",
        CellError::Value => "#VALUE!",
        CellError::NA => "#N/A",
        CellError::Null => "#NULL!",
        CellError::Num => "#NUM!",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions_are_shifted_to_zero_based() {
        assert_eq!(to_xlsx_position(1, 1).unwrap(), (0, 0));
        assert_eq!(to_xlsx_position(10, 3).unwrap(), (9, 2));
        assert!(to_xlsx_position(0, 1).is_err());
        assert!(to_xlsx_position(1, 70_000).is_err());
    }

    #[test]
    fn error_codes() {
        assert_eq!(error_text(&CellError::Div0), "#DIV/0!");
        assert_eq!(error_text(&CellError::NA), "#N/A");
    }
}
