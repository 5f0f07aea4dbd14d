//! Typed errors for the report pipeline.
//!
//! Module boundaries return `Box<dyn Error>`; these variants carry the cases a
//! caller may want to match on.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    /// Rule has neither the list nor the scalar form of a required field.
    #[error("rule '{rule}' has no {field}")]
    MissingRuleField { rule: String, field: &'static str },

    #[error("subnet '{0}' has no address prefix")]
    MissingAddressRange(String),

    #[error("malformed resource id '{0}'")]
    InvalidResourceId(String),

    #[error("malformed cell address '{0}'")]
    InvalidCellAddress(String),

    #[error("no sheet with id {0}")]
    UnknownSheet(usize),

    #[error("spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}
