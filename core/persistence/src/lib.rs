//! FILENAME: core/persistence/src/lib.rs
//! PURPOSE: Loads and saves workbooks in XLSX format.
//! CONTEXT: A workbook is an ordered list of named sheets, each backed by an
//! `engine::Grid`. Reading uses calamine, writing uses rust_xlsxwriter.
//! Cell values, row heights, column widths and hidden flags are persisted;
//! style indices are kept in memory only.

mod error;
mod xlsx_reader;
mod xlsx_writer;

pub use error::PersistenceError;
pub use xlsx_reader::load_xlsx;
pub use xlsx_writer::{save_xlsx, DATETIME_FORMAT};

use engine::grid::Grid;

// ============================================================================
// WORKBOOK
// ============================================================================

/// A complete workbook that can be saved/loaded.
#[derive(Debug, Clone)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self {
            sheets: vec![Sheet::new("Sheet1")],
        }
    }

    /// A workbook holding the given sheets, in order.
    pub fn with_sheets(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// Like `sheet_mut`, but reports a missing sheet as an error.
    pub fn require_sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, PersistenceError> {
        self.sheet_mut(name)
            .ok_or_else(|| PersistenceError::SheetNotFound(name.to_string()))
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// SHEET
// ============================================================================

/// A single named worksheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grid: Grid::new(),
        }
    }

    pub fn from_grid(name: impl Into<String>, grid: Grid) -> Self {
        Self {
            name: name.into(),
            grid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_workbook_has_one_sheet() {
        let workbook = Workbook::new();
        assert_eq!(workbook.sheet_names(), vec!["Sheet1"]);
        assert!(workbook.sheet("Sheet1").is_some());
        assert!(workbook.sheet("Other").is_none());
    }

    #[test]
    fn missing_sheet_is_an_error() {
        let mut workbook = Workbook::with_sheets(vec![Sheet::new("Data")]);
        workbook.require_sheet_mut("Data").unwrap().grid.set_value(1, 1, "x");
        assert!(matches!(
            workbook.require_sheet_mut("Report"),
            Err(PersistenceError::SheetNotFound(name)) if name == "Report"
        ));
    }
}
