//! Row transfer between two workbooks.
//!
//! Source: CodingSheet!B2:W11 with some blank tickers.
//! Destination: "Game Plan 2", rows appended from column B.

use klv_sheet::*;

fn t(s: &str) -> CellValue {
    CellValue::from(s)
}

fn spec() -> TransferSpec {
    TransferSpec {
        source_sheet: "CodingSheet".to_string(),
        source_range: RangeRef::parse("B2:D6").unwrap(),
        dest_sheet: "Game Plan 2".to_string(),
        dest_column: column_index("B").unwrap(),
    }
}

fn source_book() -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.add_sheet(
        "CodingSheet",
        vec![
            vec![t(""), t("Ticker"), t("Supports"), t("Resistances")],
            vec![t(""), t("AAPL"), t("100, 101"), t("105")],
            vec![t(""), t(""), t("stray"), t("")],
            vec![t(""), t("MSFT"), t("400"), CellValue::Number(410.0)],
        ],
    );
    wb
}

#[test]
fn blank_first_column_rows_are_skipped() {
    let src = source_book();
    let mut dst = MemoryWorkbook::new();
    dst.add_sheet(
        "Game Plan 2",
        vec![vec![t(""), t("Ticker")], vec![t(""), t("TSLA")]],
    );

    let report = transfer_rows(&src, &mut dst, &spec()).unwrap();
    assert_eq!(report.rows_read, 5);
    assert_eq!(report.rows_written, 2);
    assert_eq!(report.dest_start_row, Some(3));

    let b = |row| dst.read_cell("Game Plan 2", CellRef::new(row, 2)).unwrap();
    assert_eq!(b(3), t("AAPL"));
    assert_eq!(b(4), t("MSFT"));
    assert_eq!(
        dst.read_cell("Game Plan 2", CellRef::new(4, 4)).unwrap(),
        CellValue::Number(410.0)
    );
    // the stray row never lands
    assert_eq!(b(5), CellValue::Empty);
}

#[test]
fn block_at_first_blank_row_runs_over_rows_below_a_gap() {
    let src = source_book();
    let mut dst = MemoryWorkbook::new();
    dst.add_sheet(
        "Game Plan 2",
        vec![
            vec![t(""), t("Ticker")],
            vec![t(""), t("")],
            vec![t(""), t("NVDA")],
            vec![t(""), t("AMD")],
        ],
    );

    let report = transfer_rows(&src, &mut dst, &spec()).unwrap();
    assert_eq!(report.dest_start_row, Some(2));
    assert_eq!(report.rows_written, 2);

    // The block starts on a blank row but is written contiguously: the
    // second row lands on NVDA. Rows past the block are left alone.
    let b = |row| dst.read_cell("Game Plan 2", CellRef::new(row, 2)).unwrap();
    assert_eq!(b(1), t("Ticker"));
    assert_eq!(b(2), t("AAPL"));
    assert_eq!(b(3), t("MSFT"));
    assert_eq!(b(4), t("AMD"));
}

#[test]
fn csv_transfer_leaves_other_sheets_byte_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = tmp.path();
    let coding = ",Ticker,Supports\n,007,1.50\n,,stray\n,MSFT,1e3\n";
    let notes = "007,1.50,1e3, 42\n";
    std::fs::write(dir.join("CodingSheet.csv"), coding).unwrap();
    std::fs::write(dir.join("Game Plan 2.csv"), ",Ticker\n").unwrap();
    std::fs::write(dir.join("Notes.csv"), notes).unwrap();

    let source = CsvWorkbook::open(dir).unwrap();
    let mut dest = CsvWorkbook::open(dir).unwrap();
    let report = transfer_rows(&source, &mut dest, &spec()).unwrap();
    assert_eq!(report.rows_written, 2);
    dest.save().unwrap();

    assert_eq!(std::fs::read_to_string(dir.join("Notes.csv")).unwrap(), notes);
    assert_eq!(std::fs::read_to_string(dir.join("CodingSheet.csv")).unwrap(), coding);

    // transferred cells keep their spelling too
    let again = CsvWorkbook::open(dir).unwrap();
    let row = |r| {
        again
            .read_range("Game Plan 2", &RangeRef::parse(&format!("B{r}:C{r}")).unwrap())
            .unwrap()
            .remove(0)
    };
    assert_eq!(row(2), vec![t("007"), t("1.50")]);
    assert_eq!(row(3), vec![t("MSFT"), t("1e3")]);
}

#[test]
fn empty_destination_starts_at_row_one() {
    let src = source_book();
    let mut dst = MemoryWorkbook::new();
    dst.add_sheet("Game Plan 2", vec![]);

    let report = transfer_rows(&src, &mut dst, &spec()).unwrap();
    assert_eq!(report.dest_start_row, Some(1));
    assert_eq!(
        dst.read_cell("Game Plan 2", CellRef::new(1, 2)).unwrap(),
        t("AAPL")
    );
}

#[test]
fn nothing_to_copy_writes_nothing() {
    let mut src = MemoryWorkbook::new();
    src.add_sheet("CodingSheet", vec![]);
    let mut dst = MemoryWorkbook::new();
    dst.add_sheet("Game Plan 2", vec![vec![t(""), t("keep")]]);

    let report = transfer_rows(&src, &mut dst, &spec()).unwrap();
    assert_eq!(report.rows_written, 0);
    assert_eq!(report.dest_start_row, None);
    assert_eq!(dst.sheet("Game Plan 2").unwrap().last_used_row(), 1);
}

#[test]
fn missing_sheets_are_reported() {
    let src = source_book();
    let mut dst = MemoryWorkbook::new();
    let err = transfer_rows(&src, &mut dst, &spec()).unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound(name) if name == "Game Plan 2"));

    let empty = MemoryWorkbook::new();
    let err = transfer_rows(&empty, &mut dst, &spec()).unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound(name) if name == "CodingSheet"));
}
