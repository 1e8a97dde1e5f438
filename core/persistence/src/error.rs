//! FILENAME: core/persistence/src/error.rs
//! PURPOSE: Failures while loading a template workbook or saving a rendered one.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("XLSX write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("XLSX read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    #[error("Workbook contains no sheets")]
    EmptyWorkbook,

    #[error("Cell {row}:{col} is outside the xlsx grid")]
    CellOutOfRange { row: u32, col: u32 },

    #[error("Sheet not found: {0}")]
    SheetNotFound(String),
}
