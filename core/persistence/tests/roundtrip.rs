//! FILENAME: core/persistence/tests/roundtrip.rs
//! PURPOSE: Saves workbooks to a temporary directory and reads them back.

use chrono::NaiveDate;
use engine::{CellValue, Grid};
use persistence::{load_xlsx, save_xlsx, PersistenceError, Sheet, Workbook};
use tempfile::tempdir;

#[test]
fn values_survive_a_round_trip() {
    let mut grid = Grid::new();
    grid.set_a1("A1", "Hello {{ name }}");
    grid.set_a1("B1", 42.5);
    grid.set_a1("C1", true);
    grid.set_a1("D4", "far corner");
    let when = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();
    grid.set_a1("A2", when);

    let workbook = Workbook::with_sheets(vec![Sheet::from_grid("Report", grid)]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");
    save_xlsx(&workbook, &path).unwrap();

    let loaded = load_xlsx(&path).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["Report"]);
    let grid = &loaded.sheet("Report").unwrap().grid;

    assert_eq!(grid.value_a1("A1"), &CellValue::from("Hello {{ name }}"));
    assert_eq!(grid.value_a1("B1"), &CellValue::Number(42.5));
    assert_eq!(grid.value_a1("C1"), &CellValue::Boolean(true));
    assert_eq!(grid.value_a1("D4"), &CellValue::from("far corner"));
    assert_eq!(grid.value_a1("A2"), &CellValue::DateTime(when));
    assert_eq!((grid.max_row, grid.max_col), (4, 4));
}

#[test]
fn cells_keep_their_position_when_the_used_range_is_offset() {
    let mut grid = Grid::new();
    grid.set_a1("C5", "only");

    let workbook = Workbook::with_sheets(vec![Sheet::from_grid("Sheet1", grid)]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("offset.xlsx");
    save_xlsx(&workbook, &path).unwrap();

    let loaded = load_xlsx(&path).unwrap();
    let grid = &loaded.sheets[0].grid;
    assert_eq!(grid.value(5, 3), &CellValue::from("only"));
    assert_eq!(grid.cells.len(), 1);
}

#[test]
fn sheets_keep_their_order() {
    let mut first = Grid::new();
    first.set_a1("A1", "one");
    let mut second = Grid::new();
    second.set_a1("A1", "two");

    let workbook = Workbook::with_sheets(vec![
        Sheet::from_grid("First", first),
        Sheet::from_grid("Second", second),
    ]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("sheets.xlsx");
    save_xlsx(&workbook, &path).unwrap();

    let loaded = load_xlsx(&path).unwrap();
    assert_eq!(loaded.sheet_names(), vec!["First", "Second"]);
    assert_eq!(
        loaded.sheet("Second").unwrap().grid.value_a1("A1"),
        &CellValue::from("two")
    );
}

#[test]
fn dimensions_are_written() {
    let mut grid = Grid::new();
    grid.set_a1("A1", "x");
    grid.row_dimension_mut(1).size = Some(30.0);
    grid.column_dimension_mut(2).size = Some(20.0);
    grid.column_dimension_mut(3).hidden = true;

    let workbook = Workbook::with_sheets(vec![Sheet::from_grid("Sheet1", grid)]);
    let dir = tempdir().unwrap();
    let path = dir.path().join("dims.xlsx");
    save_xlsx(&workbook, &path).unwrap();
    assert!(path.exists());
}

#[test]
fn missing_file_is_an_error() {
    let dir = tempdir().unwrap();
    let result = load_xlsx(&dir.path().join("missing.xlsx"));
    assert!(matches!(result, Err(PersistenceError::XlsxRead(_))));
}
