//! A1-style cell addresses and the stepping used to lay out the report.

use crate::error::ReportError;
use std::fmt;
use std::str::FromStr;

/// Cell address: column index from 0 (`A`) and row number from 1.
///
/// Row 0 can't be built, so [`CellAddress::zero_based`] never underflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    column: u16,
    row: u32,
}

impl CellAddress {
    pub const ORIGIN: CellAddress = CellAddress { column: 0, row: 1 };

    pub fn new(column: u16, row: u32) -> Result<CellAddress, ReportError> {
        if row == 0 {
            return Err(ReportError::InvalidCellAddress(format!(
                "{}{row}",
                column_letters(column)
            )));
        }
        Ok(CellAddress { column, row })
    }

    /// Column index, `A` is 0.
    pub fn column(&self) -> u16 {
        self.column
    }

    /// Row number, the first row is 1.
    pub fn row(&self) -> u32 {
        self.row
    }

    /// Same row, next column.
    pub fn step_column(self) -> CellAddress {
        CellAddress {
            column: self.column + 1,
            row: self.row,
        }
    }

    /// Column `A` of the next row, whatever the current column.
    pub fn step_row(self) -> CellAddress {
        CellAddress {
            column: 0,
            row: self.row + 1,
        }
    }

    /// Zero-based `(row, column)`.
    pub fn zero_based(&self) -> (u32, u16) {
        (self.row - 1, self.column)
    }
}

impl Default for CellAddress {
    fn default() -> Self {
        CellAddress::ORIGIN
    }
}

/// `0 → A`, `25 → Z`, `26 → AA`.
pub fn column_letters(column: u16) -> String {
    let mut n = u32::from(column) + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// Inverse of [`column_letters`]; `None` on anything but `A-Z`.
pub fn column_index(letters: &str) -> Option<u16> {
    if letters.is_empty() {
        return None;
    }
    let mut n: u32 = 0;
    for c in letters.chars() {
        if !c.is_ascii_uppercase() {
            return None;
        }
        n = n.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }
    u16::try_from(n - 1).ok()
}

impl FromStr for CellAddress {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<CellAddress, ReportError> {
        let invalid = || ReportError::InvalidCellAddress(s.to_string());
        let split = s.find(|c: char| c.is_ascii_digit()).ok_or_else(invalid)?;
        let (letters, digits) = s.split_at(split);

        let column = column_index(&letters.to_ascii_uppercase()).ok_or_else(invalid)?;
        let row: u32 = digits.parse().map_err(|_| invalid())?;
        CellAddress::new(column, row).map_err(|_| invalid())
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", column_letters(self.column), self.row)
    }
}
