//! Report output.
//!
//! - [`cell`] - A1 cell addresses and column/row stepping
//! - [`sheet`] - The [`SheetWriter`] seam, the layout loop and an in-memory writer
//! - [`xlsx`] - Excel workbook writer
//! - [`csv`] - CSV dump to stdout

mod cell;
mod csv;
mod sheet;
mod xlsx;

pub use cell::{column_index, column_letters, CellAddress};
pub use csv::{format_field, print_report};
pub use sheet::{write_report, MemoryWorkbook, SheetId, SheetWriter};
pub use xlsx::XlsxWorkbook;
