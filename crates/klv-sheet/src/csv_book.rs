//! File-backed workbook: one `<sheet name>.csv` per sheet in a directory.
//!
//! Loaded eagerly into a [`MemoryWorkbook`]; [`CsvWorkbook::save`] writes back
//! only the sheets that were added or written to. Cells load as text, so a
//! saved sheet keeps its original spelling. Files have no header row: CSV row
//! 1 is sheet row 1.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::address::{CellRef, RangeRef};
use crate::host::{CellValue, SheetError, SheetHost};
use crate::memory::MemoryWorkbook;

const SHEET_EXT: &str = "csv";

#[derive(Debug, Clone)]
pub struct CsvWorkbook {
    dir: PathBuf,
    book: MemoryWorkbook,
    dirty: BTreeSet<String>,
}

impl CsvWorkbook {
    /// Load every `*.csv` file in `dir` as a sheet named after the file stem.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, SheetError> {
        let dir = dir.as_ref().to_path_buf();
        let entries = fs::read_dir(&dir).map_err(|source| SheetError::Io {
            path: dir.clone(),
            source,
        })?;

        let mut book = MemoryWorkbook::new();
        for entry in entries {
            let entry = entry.map_err(|source| SheetError::Io {
                path: dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(SHEET_EXT) {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let rows = read_sheet_file(&path)?;
            debug!(sheet = name, rows = rows.len(), "loaded csv sheet");
            book.add_sheet(name, rows);
        }

        Ok(Self {
            dir,
            book,
            dirty: BTreeSet::new(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn book(&self) -> &MemoryWorkbook {
        &self.book
    }

    /// Create (or replace) a sheet in memory; written on the next save.
    pub fn add_sheet(&mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) {
        let name = name.into();
        self.dirty.insert(name.clone());
        self.book.add_sheet(name, rows);
    }

    /// Write each changed sheet back to `<dir>/<name>.csv`. Untouched sheets
    /// keep their files byte for byte.
    pub fn save(&self) -> Result<(), SheetError> {
        for name in &self.dirty {
            let Some(grid) = self.book.sheet(name) else {
                continue;
            };
            let path = self.dir.join(format!("{name}.{SHEET_EXT}"));
            let mut w = csv::WriterBuilder::new()
                .has_headers(false)
                .flexible(true)
                .from_path(&path)?;
            for row in grid.rows() {
                if row.is_empty() {
                    // csv refuses zero-field records; one empty field keeps the row.
                    w.write_record([""])?;
                } else {
                    w.write_record(row.iter().map(|c| c.to_string()))?;
                }
            }
            w.flush().map_err(|source| SheetError::Io {
                path: path.clone(),
                source,
            })?;
            debug!(sheet = name.as_str(), path = %path.display(), "saved csv sheet");
        }
        Ok(())
    }
}

fn read_sheet_file(path: &Path) -> Result<Vec<Vec<CellValue>>, SheetError> {
    let mut r = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in r.records() {
        let record = record?;
        rows.push(record.iter().map(CellValue::from_raw).collect());
    }
    Ok(rows)
}

impl SheetHost for CsvWorkbook {
    fn read_range(&self, sheet: &str, range: &RangeRef) -> Result<Vec<Vec<CellValue>>, SheetError> {
        self.book.read_range(sheet, range)
    }

    fn write_range(
        &mut self,
        sheet: &str,
        top_left: CellRef,
        rows: &[Vec<CellValue>],
    ) -> Result<(), SheetError> {
        self.book.write_range(sheet, top_left, rows)?;
        self.dirty.insert(sheet.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_save_reopen() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join("CodingSheet.csv"),
            "Ticker,Supports\nAAPL,\"100, 101\"\n",
        )
        .unwrap();
        fs::write(tmp.path().join("notes.txt"), "ignored").unwrap();

        let mut wb = CsvWorkbook::open(tmp.path()).unwrap();
        assert_eq!(wb.book().sheet_names().collect::<Vec<_>>(), vec!["CodingSheet"]);
        assert_eq!(
            wb.read_cell("CodingSheet", CellRef::new(2, 2)).unwrap(),
            CellValue::Text("100, 101".into())
        );

        wb.write_range("CodingSheet", CellRef::new(4, 1), &[vec![CellValue::Number(103.0)]])
            .unwrap();
        wb.save().unwrap();

        let again = CsvWorkbook::open(tmp.path()).unwrap();
        assert_eq!(
            again.read_cell("CodingSheet", CellRef::new(4, 1)).unwrap(),
            CellValue::Text("103".into())
        );
        assert_eq!(
            again.read_cell("CodingSheet", CellRef::new(2, 2)).unwrap(),
            CellValue::Text("100, 101".into())
        );
    }

    #[test]
    fn save_skips_unwritten_sheets() {
        let tmp = tempdir().unwrap();
        fs::write(tmp.path().join("A.csv"), "x\n").unwrap();
        fs::write(tmp.path().join("B.csv"), "007,1.50\n").unwrap();

        let mut wb = CsvWorkbook::open(tmp.path()).unwrap();
        wb.write_range("A", CellRef::new(2, 1), &[vec![CellValue::from("y")]])
            .unwrap();
        // A failed write marks nothing.
        assert!(wb.write_range("Missing", CellRef::new(1, 1), &[]).is_err());
        wb.save().unwrap();

        assert_eq!(fs::read_to_string(tmp.path().join("A.csv")).unwrap(), "x\ny\n");
        assert_eq!(fs::read_to_string(tmp.path().join("B.csv")).unwrap(), "007,1.50\n");
        assert!(!tmp.path().join("Missing.csv").exists());
    }

    #[test]
    fn missing_dir_is_io_error() {
        let tmp = tempdir().unwrap();
        let err = CsvWorkbook::open(tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }
}
