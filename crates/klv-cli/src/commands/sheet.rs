//! `klv transfer`

use anyhow::{Context, Result};
use klv_config::AppConfig;
use klv_sheet::{column_index, transfer_rows, CsvWorkbook, RangeRef, TransferSpec};

pub fn transfer(cfg: &AppConfig, workbook: &str, dest_workbook: Option<&str>) -> Result<()> {
    let t = &cfg.transfer;
    let spec = TransferSpec {
        source_sheet: t.source_sheet.clone(),
        source_range: RangeRef::parse(&t.source_range)?,
        dest_sheet: t.dest_sheet.clone(),
        dest_column: column_index(&t.dest_column)
            .with_context(|| format!("invalid transfer.dest_column '{}'", t.dest_column))?,
    };

    let source = CsvWorkbook::open(workbook)?;
    let mut dest = CsvWorkbook::open(dest_workbook.unwrap_or(workbook))?;

    let report = transfer_rows(&source, &mut dest, &spec)?;
    if report.rows_written > 0 {
        dest.save()?;
    }

    println!(
        "transfer_ok=true rows_read={} rows_written={} dest_start_row={}",
        report.rows_read,
        report.rows_written,
        report
            .dest_start_row
            .map(|r| r.to_string())
            .unwrap_or_else(|| "NONE".to_string())
    );
    Ok(())
}
