//! FILENAME: core/persistence/src/xlsx_reader.rs

use crate::{PersistenceError, Sheet, Workbook};
use calamine::{open_workbook, CellErrorType, Data, Reader, Xlsx};
use engine::cell::{CellError, CellValue};
use engine::grid::Grid;
use engine::serial_to_datetime;
use std::path::Path;

/// Reads every worksheet of an XLSX file. Cells land at their real 1-based
/// positions regardless of where the used range starts.
pub fn load_xlsx(path: &Path) -> Result<Workbook, PersistenceError> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let sheet_names = workbook.sheet_names().to_vec();

    if sheet_names.is_empty() {
        return Err(PersistenceError::EmptyWorkbook);
    }

    let mut sheets = Vec::with_capacity(sheet_names.len());

    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name)?;
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        let mut grid = Grid::new();
        for (row, col, data) in range.used_cells() {
            let Some(value) = convert_value(data) else {
                continue;
            };
            let row = start_row + row as u32 + 1;
            let col = start_col + col as u32 + 1;
            grid.set_value(row, col, value);
        }

        log::debug!(
            "[PERSISTENCE] loaded sheet '{}': {} cell(s), {}x{}",
            sheet_name,
            grid.cells.len(),
            grid.max_row,
            grid.max_col
        );
        sheets.push(Sheet::from_grid(sheet_name.clone(), grid));
    }

    Ok(Workbook::with_sheets(sheets))
}

fn convert_value(data: &Data) -> Option<CellValue> {
    let value = match data {
        Data::Empty => return None,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Boolean(*b),
        Data::Error(e) => CellValue::Error(convert_error(e)),
        Data::DateTime(dt) => match serial_to_datetime(dt.as_f64()) {
            Some(value) => CellValue::DateTime(value),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
    };
    Some(value)
}

fn convert_error(error: &CellErrorType) -> CellError {
    match error {
        CellErrorType::Div0 => CellError::Div0,
        CellErrorType::NA | CellErrorType::GettingData => CellError::NA,
        CellErrorType::Name => CellError::Name,
        CellErrorType::Null => CellError::Null,
        CellErrorType::Num => CellError::Num,
        CellErrorType::Ref => CellError::Ref,
        CellErrorType::Value => CellError::Value,
    }
}
