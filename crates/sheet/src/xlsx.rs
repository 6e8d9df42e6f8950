use crate::cell::data_to_text;
use crate::error::{Result, SheetError};
use crate::sanitize;
use crate::table::TableData;
use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::Cursor;

fn spreadsheet_error(e: calamine::Error) -> SheetError {
    SheetError::SpreadsheetFormat(e.to_string())
}

/// Raw rows of the used range, every row as wide as the range
fn range_rows(range: &Range<Data>) -> impl Iterator<Item = Vec<String>> + '_ {
    range
        .rows()
        .map(|row| row.iter().map(data_to_text).collect())
}

impl TableData {
    /// Load the first sheet of a workbook held in memory.
    ///
    /// The container (xlsx, xlsm, xlsb, xls, ods) is detected from the bytes.
    /// A workbook without sheets yields the empty table.
    ///
    /// # Errors
    ///
    /// Returns `SpreadsheetFormat` if the bytes are not a readable workbook.
    pub fn from_spreadsheet_bytes(bytes: &[u8]) -> Result<Self> {
        let mut workbook =
            open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(spreadsheet_error)?;

        let Some(first) = workbook.worksheet_range_at(0) else {
            tracing::debug!("workbook has no sheets");
            return Ok(TableData::empty());
        };
        let range = first.map_err(spreadsheet_error)?;

        let (height, width) = range.get_size();
        tracing::debug!(height, width, "read first sheet");

        Ok(sanitize::into_table(range_rows(&range), sanitize::is_blank_row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn test_xlsx_bytes_to_table() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "ID").unwrap();
        sheet.write_string(0, 1, "Score").unwrap();
        sheet.write_string(0, 2, "Passed").unwrap();
        sheet.write_number(1, 0, 1).unwrap();
        sheet.write_number(1, 1, 92.5).unwrap();
        sheet.write_boolean(1, 2, true).unwrap();
        sheet.write_number(2, 0, 2).unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = TableData::from_spreadsheet_bytes(&bytes).unwrap();

        assert_eq!(table.headers(), ["ID", "Score", "Passed"]);
        assert_eq!(table.rows()[0], ["1", "92.5", "true"]);
        assert_eq!(table.rows()[1], ["2", "", ""]);
    }

    #[test]
    fn test_xlsx_only_first_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet().write_string(0, 0, "first").unwrap();
        let second = workbook.add_worksheet();
        second.write_string(0, 0, "second").unwrap();
        second.write_string(1, 0, "x").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = TableData::from_spreadsheet_bytes(&bytes).unwrap();

        assert_eq!(table.headers(), ["first"]);
        assert!(table.rows().is_empty());
    }

    #[test]
    fn test_xlsx_empty_sheet() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let table = TableData::from_spreadsheet_bytes(&bytes).unwrap();
        assert_eq!(table, TableData::empty());
    }

    #[test]
    fn test_not_a_workbook() {
        let err = TableData::from_spreadsheet_bytes(b"ID,Name\n1,A\n").unwrap_err();
        assert!(matches!(err, SheetError::SpreadsheetFormat(_)));

        let err = TableData::from_spreadsheet_bytes(&[]).unwrap_err();
        assert!(matches!(err, SheetError::SpreadsheetFormat(_)));
    }
}
