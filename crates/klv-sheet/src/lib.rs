//! klv-sheet
//!
//! Spreadsheet host boundary.
//!
//! The workflow only ever needs four host services: read a range, write a
//! range, show a block of text, and fetch a URL (see `klv-fundamentals`).
//! This crate owns the first three as narrow traits plus two concrete hosts
//! (in-memory and a directory of CSV files), and the operations built on
//! them: the cross-sheet row transfer and the decoded-cell display action.

pub mod address;
pub mod csv_book;
pub mod display;
pub mod host;
pub mod memory;
pub mod transfer;

pub use address::{column_index, column_letters, CellRef, RangeRef};
pub use csv_book::CsvWorkbook;
pub use display::{show_decoded_cell, RecordingDisplay, TextDisplay, DISPLAY_TITLE};
pub use host::{CellValue, SheetError, SheetHost};
pub use memory::MemoryWorkbook;
pub use transfer::{first_blank_row, transfer_rows, TransferReport, TransferSpec};
