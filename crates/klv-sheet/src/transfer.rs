//! Cross-sheet row transfer.
//!
//! Copies a fixed source range into a destination sheet, skipping source rows
//! whose first cell is blank, and appends them at the first destination row
//! whose anchor column is blank.

use tracing::{info, warn};

use crate::address::{CellRef, RangeRef};
use crate::host::{CellValue, SheetError, SheetHost};

#[derive(Debug, Clone)]
pub struct TransferSpec {
    pub source_sheet: String,
    pub source_range: RangeRef,
    pub dest_sheet: String,
    /// Column the rows are written from, and the one scanned for the first
    /// blank row.
    pub dest_column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferReport {
    pub rows_read: usize,
    pub rows_written: usize,
    /// First destination row written; `None` when nothing was written.
    pub dest_start_row: Option<u32>,
}

/// Copy non-blank rows from `source` to `dest` per `spec`.
///
/// Missing sheets fail with [`SheetError::SheetNotFound`] before anything is
/// written.
pub fn transfer_rows<S, D>(
    source: &S,
    dest: &mut D,
    spec: &TransferSpec,
) -> Result<TransferReport, SheetError>
where
    S: SheetHost + ?Sized,
    D: SheetHost + ?Sized,
{
    let rows = source.read_range(&spec.source_sheet, &spec.source_range)?;
    let rows_read = rows.len();

    let keep: Vec<Vec<CellValue>> = rows
        .into_iter()
        .filter(|r| r.first().is_some_and(|c| !c.is_blank()))
        .collect();

    // Resolve the destination even when there is nothing to write, so a
    // misconfigured sheet name is reported either way.
    let start_row = first_blank_row(dest, &spec.dest_sheet, spec.dest_column)?;

    if keep.is_empty() {
        warn!(
            source_sheet = %spec.source_sheet,
            range = %spec.source_range,
            "no non-blank rows to transfer"
        );
        return Ok(TransferReport {
            rows_read,
            rows_written: 0,
            dest_start_row: None,
        });
    }

    dest.write_range(&spec.dest_sheet, CellRef::new(start_row, spec.dest_column), &keep)?;
    info!(
        source_sheet = %spec.source_sheet,
        dest_sheet = %spec.dest_sheet,
        start_row,
        rows = keep.len(),
        "rows transferred"
    );

    Ok(TransferReport {
        rows_read,
        rows_written: keep.len(),
        dest_start_row: Some(start_row),
    })
}

/// First 1-based row whose cell in `col` is blank.
pub fn first_blank_row<H>(host: &H, sheet: &str, col: u32) -> Result<u32, SheetError>
where
    H: SheetHost + ?Sized,
{
    let values = host.read_range(sheet, &RangeRef::column(col))?;
    let idx = values
        .iter()
        .position(|r| r.first().map_or(true, CellValue::is_blank))
        .unwrap_or(values.len());
    Ok(idx as u32 + 1)
}
