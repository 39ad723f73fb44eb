//! Cell values, the read/write host trait, and the crate error type.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::address::{CellRef, RangeRef};

/// One cell as the host reports it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// Text cells holding `""` count as blank, like an untouched cell.
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
        }
    }

    /// Cell from a raw string of a file-backed sheet: empty -> `Empty`,
    /// anything else -> `Text`, verbatim. Numeric reads go through
    /// [`CellValue::as_number`], so `007` or `1.50` are saved back unchanged.
    pub fn from_raw(raw: &str) -> Self {
        if raw.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(raw.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            CellValue::Empty => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("sheet not found: '{0}'")]
    SheetNotFound(String),

    #[error("invalid cell address '{address}': {reason}")]
    InvalidAddress {
        address: String,
        reason: &'static str,
    },

    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("display failed: {0}")]
    Display(String),
}

/// Read/write access to named sheets of one workbook.
pub trait SheetHost {
    /// Values of `range` on `sheet`, row-major.
    ///
    /// Bounded ranges come back exactly `rows x width`, padded with
    /// [`CellValue::Empty`]. Open-ended ranges stop at the sheet's last used
    /// row.
    fn read_range(&self, sheet: &str, range: &RangeRef) -> Result<Vec<Vec<CellValue>>, SheetError>;

    /// Write `rows` with `top_left` as the first cell. Ragged rows are fine.
    fn write_range(
        &mut self,
        sheet: &str,
        top_left: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<(), SheetError>;

    fn read_cell(&self, sheet: &str, cell: CellRef) -> Result<CellValue, SheetError> {
        let rows = self.read_range(sheet, &RangeRef::cell(cell))?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|r| r.into_iter().next())
            .unwrap_or_default())
    }
}
