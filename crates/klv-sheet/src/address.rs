//! A1 notation: `AJ2`, `B2:W11`, whole-column `B:B`.
//!
//! Rows and columns are 1-based, as the sheet shows them. Parsing is
//! case-insensitive (`Ai2` == `AI2`).

use std::fmt;
use std::str::FromStr;

use crate::host::SheetError;

/// Largest column the parser accepts (`XFD`, the common sheet limit).
const MAX_COLUMN: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellRef {
    pub row: u32,
    pub col: u32,
}

impl CellRef {
    pub fn new(row: u32, col: u32) -> Self {
        debug_assert!(row >= 1 && col >= 1);
        Self { row, col }
    }

    pub fn parse(s: &str) -> Result<Self, SheetError> {
        let t = s.trim();
        let split = t
            .find(|c: char| c.is_ascii_digit())
            .ok_or_else(|| invalid(s, "missing row number"))?;
        let (letters, digits) = t.split_at(split);
        let col = column_index(letters).ok_or_else(|| invalid(s, "bad column letters"))?;
        let row = parse_row(digits).ok_or_else(|| invalid(s, "bad row number"))?;
        Ok(Self { row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.col), self.row)
    }
}

impl FromStr for CellRef {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rectangular range. `end_row == None` means open-ended (`B:B`): the host
/// returns rows down to the sheet's last used row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeRef {
    pub start_row: u32,
    pub end_row: Option<u32>,
    pub start_col: u32,
    pub end_col: u32,
}

impl RangeRef {
    pub fn cell(cell: CellRef) -> Self {
        Self {
            start_row: cell.row,
            end_row: Some(cell.row),
            start_col: cell.col,
            end_col: cell.col,
        }
    }

    /// Whole column, row 1 downwards.
    pub fn column(col: u32) -> Self {
        Self {
            start_row: 1,
            end_row: None,
            start_col: col,
            end_col: col,
        }
    }

    pub fn width(&self) -> usize {
        (self.end_col - self.start_col + 1) as usize
    }

    pub fn parse(s: &str) -> Result<Self, SheetError> {
        let t = s.trim();
        let Some((a, b)) = t.split_once(':') else {
            return Ok(Self::cell(CellRef::parse(t)?));
        };

        let a_is_col = !a.is_empty() && a.chars().all(|c| c.is_ascii_alphabetic());
        let b_is_col = !b.is_empty() && b.chars().all(|c| c.is_ascii_alphabetic());
        let range = if a_is_col && b_is_col {
            let start_col = column_index(a).ok_or_else(|| invalid(s, "bad column letters"))?;
            let end_col = column_index(b).ok_or_else(|| invalid(s, "bad column letters"))?;
            Self {
                start_row: 1,
                end_row: None,
                start_col,
                end_col,
            }
        } else {
            let start = CellRef::parse(a)?;
            let end = CellRef::parse(b)?;
            if end.row < start.row {
                return Err(invalid(s, "end row before start row"));
            }
            Self {
                start_row: start.row,
                end_row: Some(end.row),
                start_col: start.col,
                end_col: end.col,
            }
        };

        if range.end_col < range.start_col {
            return Err(invalid(s, "end column before start column"));
        }
        Ok(range)
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.end_row {
            Some(end_row) => write!(
                f,
                "{}{}:{}{}",
                column_letters(self.start_col),
                self.start_row,
                column_letters(self.end_col),
                end_row
            ),
            None => write!(
                f,
                "{}:{}",
                column_letters(self.start_col),
                column_letters(self.end_col)
            ),
        }
    }
}

impl FromStr for RangeRef {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `A` -> 1, `Z` -> 26, `AA` -> 27. Case-insensitive.
pub fn column_index(letters: &str) -> Option<u32> {
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut idx: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        idx = idx * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
    }
    (idx <= MAX_COLUMN).then_some(idx)
}

/// Inverse of [`column_index`].
pub fn column_letters(mut col: u32) -> String {
    let mut out = Vec::new();
    while col > 0 {
        let rem = (col - 1) % 26;
        out.push((b'A' + rem as u8) as char);
        col = (col - 1) / 26;
    }
    out.iter().rev().collect()
}

fn parse_row(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|r| *r >= 1)
}

fn invalid(address: &str, reason: &'static str) -> SheetError {
    SheetError::InvalidAddress {
        address: address.to_string(),
        reason,
    }
}
