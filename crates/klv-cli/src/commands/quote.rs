//! `klv decode`, `klv encode`, `klv show-cell`

use anyhow::{Context, Result};
use klv_config::AppConfig;
use klv_quote::QuoteVariant;
use klv_sheet::{show_decoded_cell, CellRef, CsvWorkbook, SheetError, TextDisplay};

use super::TextSource;

/// Writes shown blocks to stdout under a title line.
struct StdoutDisplay;

impl TextDisplay for StdoutDisplay {
    fn show_text(&mut self, title: &str, html_safe: &str) -> Result<(), SheetError> {
        println!("== {title} ==");
        println!("{html_safe}");
        Ok(())
    }
}

pub fn decode(variant: QuoteVariant, source: &TextSource, html: bool) -> Result<()> {
    let escaped = source.read()?;
    let raw = variant.decode(&escaped);
    if html {
        println!("{}", variant.escape_for_display(&raw));
    } else {
        println!("{raw}");
    }
    Ok(())
}

pub fn encode(variant: QuoteVariant, source: &TextSource) -> Result<()> {
    let raw = source.read()?;
    let escaped = variant
        .encode(&raw)
        .with_context(|| format!("encode failed for variant {}", variant.as_str()))?;
    println!("{escaped}");
    Ok(())
}

pub fn show_cell(
    cfg: &AppConfig,
    workbook: &str,
    variant: QuoteVariant,
    sheet: Option<String>,
    cell: Option<String>,
) -> Result<()> {
    let book = CsvWorkbook::open(workbook)?;
    let sheet = sheet.unwrap_or_else(|| cfg.sheets.coding_sheet.clone());
    let cell = match cell {
        Some(c) => c,
        None => match variant {
            QuoteVariant::Sentinel => cfg.sheets.tradestation_cell.clone(),
            QuoteVariant::Doubled => cfg.sheets.tradingview_cell.clone(),
        },
    };
    let cell = CellRef::parse(&cell)?;

    show_decoded_cell(&book, &mut StdoutDisplay, &sheet, cell, variant)?;
    Ok(())
}
