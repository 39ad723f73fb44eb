//! `klv fundamentals`

use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;
use klv_config::{resolve_secrets, AppConfig};
use klv_fundamentals::{fundamentals_row, AlphaVantageProvider, FmpProvider, FundamentalsProvider};
use klv_sheet::{CellRef, CellValue, CsvWorkbook, SheetHost};

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Provider {
    Fmp,
    AlphaVantage,
}

/// Where to put the two-cell row in a workbook.
pub struct RowTarget {
    pub workbook: String,
    pub sheet: String,
    pub cell: String,
}

pub fn run(
    cfg: &AppConfig,
    provider: Provider,
    symbol: &str,
    target: Option<RowTarget>,
) -> Result<()> {
    let secrets = resolve_secrets(cfg);
    let timeout = Duration::from_secs(cfg.http.timeout_secs);

    let client: Box<dyn FundamentalsProvider> = match provider {
        Provider::Fmp => Box::new(FmpProvider::new_with_base_url(
            secrets.require_fmp_api_key()?.to_string(),
            cfg.providers.fmp.base_url.clone(),
            timeout,
        )?),
        Provider::AlphaVantage => Box::new(AlphaVantageProvider::new_with_base_url(
            secrets.require_alpha_vantage_api_key()?.to_string(),
            cfg.providers.alpha_vantage.base_url.clone(),
            timeout,
        )?),
    };

    let row = fundamentals_row(client.as_ref(), symbol);

    if let Some(t) = target {
        let mut book = CsvWorkbook::open(&t.workbook)?;
        let at = CellRef::parse(&t.cell)?;
        let cells: Vec<CellValue> = row.iter().map(|v| CellValue::from_raw(v)).collect();
        book.write_range(&t.sheet, at, &[cells])?;
        book.save()?;
    }

    println!(
        "{}",
        serde_json::to_string(&row).context("serialize fundamentals row failed")?
    );
    Ok(())
}
