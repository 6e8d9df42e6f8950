use crate::error::{Result, SheetError};
use crate::table::TableData;
use std::path::Path;

/// Formats a source can be loaded as, decided by file extension alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Spreadsheet,
}

impl SourceFormat {
    /// Map a file name to its format.
    ///
    /// Only `.csv`, `.xlsx` and `.xls` (any case) are accepted. The content is
    /// never inspected.
    pub fn from_file_name(name: &str) -> Result<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "csv" => Ok(SourceFormat::Csv),
            "xlsx" | "xls" => Ok(SourceFormat::Spreadsheet),
            _ => Err(SheetError::UnsupportedFormat { extension: ext }),
        }
    }
}

/// A named file held in memory, as handed over by a file picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        SourceFile {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Parse the file according to its extension.
    pub fn load(&self) -> Result<TableData> {
        load_bytes(&self.name, &self.bytes)
    }
}

/// Decode CSV bytes as UTF-8, replacing invalid sequences and dropping a BOM.
fn decode_text(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    text.strip_prefix('\u{feff}').unwrap_or(&text).to_string()
}

/// Parse in-memory file content, choosing the parser from `name`'s extension.
///
/// # Errors
///
/// Returns `UnsupportedFormat` for any extension other than csv, xlsx or xls,
/// and `SpreadsheetFormat` when spreadsheet bytes cannot be decoded.
pub fn load_bytes(name: &str, bytes: &[u8]) -> Result<TableData> {
    let table = match SourceFormat::from_file_name(name)? {
        SourceFormat::Csv => TableData::from_csv_str(&decode_text(bytes)),
        SourceFormat::Spreadsheet => TableData::from_spreadsheet_bytes(bytes)?,
    };
    tracing::debug!(
        name,
        columns = table.col_count(),
        rows = table.row_count(),
        "loaded source"
    );
    Ok(table)
}

/// Load a file from disk. The extension is checked before the file is opened.
#[cfg(not(target_arch = "wasm32"))]
pub fn load_path<P: AsRef<Path>>(path: P) -> Result<TableData> {
    let path = path.as_ref();
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SheetError::Parse(format!("Invalid filename: {}", path.display())))?;

    SourceFormat::from_file_name(name)?;
    let bytes = std::fs::read(path)?;
    load_bytes(name, &bytes)
}
