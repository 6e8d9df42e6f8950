//! Post-processing shared by every raw table source.
//!
//! Both the delimited-text parser and the spreadsheet normalizer produce raw
//! rows of text and hand them to [`into_table`], so header extraction and
//! row-width reconciliation behave the same regardless of where the data came
//! from. Each source supplies its own notion of a blank row.

use crate::table::TableData;

/// A scanned text line is empty when it has no fields, or a single field of
/// whitespace. Lines such as `,,` are data.
pub(crate) fn is_empty_line(row: &[String]) -> bool {
    match row {
        [] => true,
        [only] => only.trim().is_empty(),
        _ => false,
    }
}

/// A spreadsheet row is blank when it has no cells or every cell is whitespace.
pub(crate) fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Truncate or pad a row with empty cells to exactly `width` cells.
pub(crate) fn reconcile_row(mut row: Vec<String>, width: usize) -> Vec<String> {
    row.resize(width, String::new());
    row
}

/// Drop rows matching `is_blank`, split off the header row and reconcile the rest.
pub(crate) fn into_table<I, F>(raw_rows: I, is_blank: F) -> TableData
where
    I: IntoIterator<Item = Vec<String>>,
    F: Fn(&[String]) -> bool,
{
    let mut rows = raw_rows.into_iter().filter(|row| !is_blank(row));

    let Some(headers) = rows.next() else {
        return TableData::empty();
    };

    // TableData::new reconciles widths
    let table = TableData::new(headers, rows.collect());
    tracing::debug!(
        columns = table.col_count(),
        rows = table.row_count(),
        "sanitized table"
    );
    table
}
