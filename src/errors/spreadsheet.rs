use thiserror::Error;

use super::CoreError;

/// Spreadsheet import/export errors
#[derive(Error, Debug)]
pub enum SpreadsheetError {
    #[error("Export failed: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Import failed: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("Import file is not valid base64")]
    InvalidEncoding(#[from] base64::DecodeError),

    #[error("Import file has no worksheet")]
    MissingSheet,

    #[error("Import file has no header row")]
    MissingHeader,

    #[error("Failed to write export file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<SpreadsheetError> for CoreError {
    fn from(err: SpreadsheetError) -> Self {
        match err {
            SpreadsheetError::Write(_) | SpreadsheetError::Io(_) => {
                CoreError::internal(err.to_string()).with_source(err)
            }
            _ => CoreError::validation(err.to_string()).with_source(err),
        }
    }
}
