//! Spreadsheet sink and the report layout loop.

use super::cell::CellAddress;
use crate::error::ReportError;
use crate::processing::{ReportLine, REPORT_COLUMNS};
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};

/// Handle returned by [`SheetWriter::new_sheet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetId(pub usize);

/// The four spreadsheet primitives the report needs.
pub trait SheetWriter {
    fn new_sheet(&mut self, name: &str) -> Result<SheetId, Box<dyn Error>>;

    fn set_cell(
        &mut self,
        sheet: SheetId,
        address: CellAddress,
        value: &str,
    ) -> Result<(), Box<dyn Error>>;

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), Box<dyn Error>>;

    fn save_as(&mut self, path: &Path) -> Result<(), Box<dyn Error>>;
}

/// Write report lines to a new sheet starting at `A1`, then activate it and save.
///
/// Each row fills columns `A..E` by stepping one column at a time and ends with
/// a row step; each separator is one more row step.
///
/// # Returns
/// * `Ok(n)` - Number of data rows written
/// * `Err` - Any sheet or save failure; nothing is retried
pub fn write_report<W: SheetWriter + ?Sized>(
    writer: &mut W,
    sheet_name: &str,
    lines: &[ReportLine],
    path: &Path,
) -> Result<usize, Box<dyn Error>> {
    log::info!("#Start write_report() sheet='{sheet_name}' lines={}", lines.len());
    let sheet = writer.new_sheet(sheet_name)?;

    let mut cell = CellAddress::ORIGIN;
    let mut rows = 0;
    for line in lines {
        match line {
            ReportLine::Row(row) => {
                for (i, value) in row.cells().into_iter().enumerate() {
                    if i > 0 {
                        cell = cell.step_column();
                    }
                    writer.set_cell(sheet, cell, value)?;
                }
                debug_assert_eq!(usize::from(cell.column()) + 1, REPORT_COLUMNS);
                cell = cell.step_row();
                rows += 1;
            }
            ReportLine::Separator => cell = cell.step_row(),
        }
    }

    writer.set_active_sheet(sheet)?;
    writer.save_as(path)?;
    log::info!("Wrote {rows} rows to {}", path.display());
    Ok(rows)
}

/// In-memory [`SheetWriter`]; keeps every cell for inspection.
#[derive(Debug, Default)]
pub struct MemoryWorkbook {
    pub sheets: Vec<String>,
    pub cells: BTreeMap<(SheetId, CellAddress), String>,
    pub active: Option<SheetId>,
    pub saved_to: Option<PathBuf>,
}

impl MemoryWorkbook {
    pub fn new() -> MemoryWorkbook {
        MemoryWorkbook::default()
    }

    pub fn cell(&self, sheet: SheetId, address: &str) -> Option<&str> {
        let address = address.parse().ok()?;
        self.cells.get(&(sheet, address)).map(String::as_str)
    }

    fn check(&self, sheet: SheetId) -> Result<(), ReportError> {
        if sheet.0 < self.sheets.len() {
            Ok(())
        } else {
            Err(ReportError::UnknownSheet(sheet.0))
        }
    }
}

impl SheetWriter for MemoryWorkbook {
    fn new_sheet(&mut self, name: &str) -> Result<SheetId, Box<dyn Error>> {
        if self.sheets.iter().any(|s| s == name) {
            return Err(format!("Sheet '{name}' already exists").into());
        }
        self.sheets.push(name.to_string());
        Ok(SheetId(self.sheets.len() - 1))
    }

    fn set_cell(
        &mut self,
        sheet: SheetId,
        address: CellAddress,
        value: &str,
    ) -> Result<(), Box<dyn Error>> {
        self.check(sheet)?;
        self.cells.insert((sheet, address), value.to_string());
        Ok(())
    }

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), Box<dyn Error>> {
        self.check(sheet)?;
        self.active = Some(sheet);
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<(), Box<dyn Error>> {
        self.saved_to = Some(path.to_path_buf());
        Ok(())
    }
}
