//! In-memory workbook host.

use std::collections::BTreeMap;

use crate::address::{CellRef, RangeRef};
use crate::host::{CellValue, SheetError, SheetHost};

/// Ragged row-major grid. Row `i` of the vec is sheet row `i + 1`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<CellValue>>,
}

impl Grid {
    pub fn from_rows(rows: Vec<Vec<CellValue>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Last row holding a non-blank cell (0 when the sheet is empty).
    pub fn last_used_row(&self) -> u32 {
        self.rows
            .iter()
            .rposition(|r| r.iter().any(|c| !c.is_blank()))
            .map(|i| i as u32 + 1)
            .unwrap_or(0)
    }

    pub fn get(&self, cell: CellRef) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        self.rows
            .get(cell.row as usize - 1)
            .and_then(|r| r.get(cell.col as usize - 1))
            .unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, cell: CellRef, value: CellValue) {
        let (r, c) = (cell.row as usize - 1, cell.col as usize - 1);
        if self.rows.len() <= r {
            self.rows.resize_with(r + 1, Vec::new);
        }
        let row = &mut self.rows[r];
        if row.len() <= c {
            row.resize_with(c + 1, CellValue::default);
        }
        row[c] = value;
    }

    fn read(&self, range: &RangeRef) -> Vec<Vec<CellValue>> {
        let end_row = range.end_row.unwrap_or_else(|| self.last_used_row());
        (range.start_row..=end_row)
            .map(|row| {
                (range.start_col..=range.end_col)
                    .map(|col| self.get(CellRef::new(row, col)).clone())
                    .collect()
            })
            .collect()
    }

    fn write(&mut self, top_left: CellRef, rows: &[Vec<CellValue>]) {
        for (dr, row) in rows.iter().enumerate() {
            for (dc, value) in row.iter().enumerate() {
                let cell = CellRef::new(top_left.row + dr as u32, top_left.col + dc as u32);
                self.set(cell, value.clone());
            }
        }
    }
}

/// Named sheets held in memory. Sheets must be added before they are read
/// or written; unknown names fail with [`SheetError::SheetNotFound`].
#[derive(Debug, Clone, Default)]
pub struct MemoryWorkbook {
    sheets: BTreeMap<String, Grid>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) {
        self.sheets.insert(name.into(), Grid::from_rows(rows));
    }

    pub fn sheet(&self, name: &str) -> Option<&Grid> {
        self.sheets.get(name)
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(|s| s.as_str())
    }

    fn grid(&self, name: &str) -> Result<&Grid, SheetError> {
        self.sheets
            .get(name)
            .ok_or_else(|| SheetError::SheetNotFound(name.to_string()))
    }

    fn grid_mut(&mut self, name: &str) -> Result<&mut Grid, SheetError> {
        self.sheets
            .get_mut(name)
            .ok_or_else(|| SheetError::SheetNotFound(name.to_string()))
    }
}

impl SheetHost for MemoryWorkbook {
    fn read_range(&self, sheet: &str, range: &RangeRef) -> Result<Vec<Vec<CellValue>>, SheetError> {
        Ok(self.grid(sheet)?.read(range))
    }

    fn write_range(
        &mut self,
        sheet: &str,
        top_left: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<(), SheetError> {
        self.grid_mut(sheet)?.write(top_left, rows);
        Ok(())
    }
}
