//! `.xlsx` output through `rust_xlsxwriter`.

use super::cell::CellAddress;
use super::sheet::{SheetId, SheetWriter};
use crate::error::ReportError;
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::Path;

/// [`SheetWriter`] producing an Excel workbook.
pub struct XlsxWorkbook {
    workbook: Workbook,
    sheet_count: usize,
}

impl XlsxWorkbook {
    pub fn new() -> XlsxWorkbook {
        XlsxWorkbook {
            workbook: Workbook::new(),
            sheet_count: 0,
        }
    }

    fn sheet_index(&self, sheet: SheetId) -> Result<usize, ReportError> {
        if sheet.0 < self.sheet_count {
            Ok(sheet.0)
        } else {
            Err(ReportError::UnknownSheet(sheet.0))
        }
    }
}

impl Default for XlsxWorkbook {
    fn default() -> Self {
        Self::new()
    }
}

impl SheetWriter for XlsxWorkbook {
    fn new_sheet(&mut self, name: &str) -> Result<SheetId, Box<dyn Error>> {
        let worksheet = self.workbook.add_worksheet();
        self.sheet_count += 1;
        worksheet.set_name(name).map_err(ReportError::from)?;
        Ok(SheetId(self.sheet_count - 1))
    }

    fn set_cell(
        &mut self,
        sheet: SheetId,
        address: CellAddress,
        value: &str,
    ) -> Result<(), Box<dyn Error>> {
        let index = self.sheet_index(sheet)?;
        let (row, column) = address.zero_based();
        self.workbook
            .worksheet_from_index(index)
            .and_then(|ws| ws.write_string(row, column, value).map(|_| ()))
            .map_err(ReportError::from)?;
        Ok(())
    }

    fn set_active_sheet(&mut self, sheet: SheetId) -> Result<(), Box<dyn Error>> {
        let index = self.sheet_index(sheet)?;
        self.workbook
            .worksheet_from_index(index)
            .map_err(ReportError::from)?
            .set_active(true);
        Ok(())
    }

    fn save_as(&mut self, path: &Path) -> Result<(), Box<dyn Error>> {
        log::info!("Saving workbook to {}", path.display());
        self.workbook.save(path).map_err(ReportError::from)?;
        Ok(())
    }
}
