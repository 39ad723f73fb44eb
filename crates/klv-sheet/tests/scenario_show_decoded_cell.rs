//! The "copy and format" actions: read the script cell, decode it, show the
//! HTML-safe text, hand back the exact source for the clipboard.

use klv_quote::QuoteVariant;
use klv_sheet::*;

const SHEET: &str = "CodingSheet";

fn book_with(cell: &str, value: &str) -> MemoryWorkbook {
    let mut wb = MemoryWorkbook::new();
    wb.add_sheet(SHEET, vec![]);
    wb.write_range(SHEET, CellRef::parse(cell).unwrap(), &[vec![CellValue::from(value)]])
        .unwrap();
    wb
}

#[test]
fn tradestation_cell_uses_sentinel_variant() {
    let wb = book_with("AI2", "Plot1(Close, @Close@); if Close > 0 then Value1 = \"\"\"\";");
    let mut display = RecordingDisplay::default();

    let raw = show_decoded_cell(
        &wb,
        &mut display,
        SHEET,
        CellRef::parse("Ai2").unwrap(),
        QuoteVariant::Sentinel,
    )
    .unwrap();

    assert_eq!(raw, "Plot1(Close, \"Close\"); if Close > 0 then Value1 = \"\";");
    let (title, body) = &display.shown[0];
    assert_eq!(title, DISPLAY_TITLE);
    assert_eq!(
        body,
        "Plot1(Close, &quot;Close&quot;); if Close &gt; 0 then Value1 = &quot;&quot;;"
    );
}

#[test]
fn tradingview_cell_uses_doubled_variant() {
    let wb = book_with("AJ2", "\"//@version=6\nindicator(\"\"KL\"\", overlay=true)\nx = a < b\"");
    let mut display = RecordingDisplay::default();

    let raw = show_decoded_cell(
        &wb,
        &mut display,
        SHEET,
        CellRef::parse("AJ2").unwrap(),
        QuoteVariant::Doubled,
    )
    .unwrap();

    assert_eq!(raw, "//@version=6\nindicator(\"KL\", overlay=true)\nx = a < b");
    assert_eq!(
        display.shown[0].1,
        "//@version=6\nindicator(\"KL\", overlay=true)\nx = a &lt; b"
    );
}

#[test]
fn missing_sheet_shows_nothing() {
    let wb = MemoryWorkbook::new();
    let mut display = RecordingDisplay::default();
    let cell = CellRef::new(2, 36);
    let err = show_decoded_cell(&wb, &mut display, SHEET, cell, QuoteVariant::Doubled).unwrap_err();
    assert!(matches!(err, SheetError::SheetNotFound(_)));
    assert!(display.shown.is_empty());
}
