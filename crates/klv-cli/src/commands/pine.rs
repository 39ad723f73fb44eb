//! `klv pine gap`, `klv pine levels`

use anyhow::Result;
use klv_config::AppConfig;
use klv_pine::{gap_indicator, key_levels_script, parse_key_levels, PineOptions};
use klv_sheet::{CsvWorkbook, RangeRef, SheetHost};

fn options(cfg: &AppConfig, title: Option<String>) -> PineOptions {
    PineOptions {
        title: title.unwrap_or_else(|| cfg.pine.title.clone()),
        label_color: cfg.pine.label_color.clone(),
        ..PineOptions::default()
    }
}

pub fn gap(cfg: &AppConfig, title: Option<String>) -> Result<()> {
    print!("{}", gap_indicator(&options(cfg, title)));
    Ok(())
}

pub fn levels(
    cfg: &AppConfig,
    workbook: &str,
    sheet: Option<String>,
    range: Option<String>,
    title: Option<String>,
) -> Result<()> {
    let book = CsvWorkbook::open(workbook)?;
    let sheet = sheet.unwrap_or_else(|| cfg.sheets.coding_sheet.clone());
    let range = RangeRef::parse(range.as_deref().unwrap_or(&cfg.sheets.levels_range))?;

    let rows = book.read_range(&sheet, &range)?;
    let levels = parse_key_levels(&rows);
    tracing::info!(sheet = %sheet, tickers = levels.len(), "key levels parsed");

    print!("{}", key_levels_script(&levels, &options(cfg, title)));
    Ok(())
}
