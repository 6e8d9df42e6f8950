use thiserror::Error;

use crate::table::Side;

/// Errors that can occur while loading, joining or exporting tables
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Unsupported file format: '{extension}'. Supported: csv, xlsx, xls")]
    UnsupportedFormat { extension: String },

    #[error("Could not read spreadsheet: {0}")]
    SpreadsheetFormat(String),

    #[error("{name} is empty or has no data rows")]
    EmptyOrInvalidTable { name: String },

    #[error("Column '{column}' not found in {side} table")]
    InvalidColumn { column: String, side: Side },

    #[error("No {0} table loaded")]
    TableNotLoaded(Side),

    #[error("Select a {0} before merging")]
    MissingSelection(&'static str),

    #[error("Nothing to export. Merge the tables first")]
    NothingToExport,

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
