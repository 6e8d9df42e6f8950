use crate::error::{Result, SheetError};
use crate::sanitize;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Display name given to tables loaded from pasted text.
pub const PASTED_SOURCE_NAME: &str = "Pasted Data";

/// Which slot of a lookup a table occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// The table every output row comes from.
    Left,
    /// The table values are looked up in.
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

impl std::str::FromStr for Side {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            other => Err(SheetError::Parse(format!(
                "Unknown table side '{other}'. Expected 'left' or 'right'"
            ))),
        }
    }
}

/// A rectangular table of text cells with a header row.
///
/// Every row has exactly `headers().len()` cells. Constructors reconcile
/// ragged input (truncate or pad with empty strings), so the invariant holds
/// for every value of this type, including deserialized ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTableData")]
pub struct TableData {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// Unchecked wire shape, reconciled on the way in.
#[derive(Deserialize)]
struct RawTableData {
    #[serde(default)]
    headers: Vec<String>,
    #[serde(default)]
    rows: Vec<Vec<String>>,
}

impl From<RawTableData> for TableData {
    fn from(raw: RawTableData) -> Self {
        TableData::new(raw.headers, raw.rows)
    }
}

impl TableData {
    /// Create a table, reconciling every row to the header width
    #[must_use]
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| sanitize::reconcile_row(row, width))
            .collect();
        TableData { headers, rows }
    }

    /// The table with no headers and no rows
    #[must_use]
    pub fn empty() -> Self {
        TableData::default()
    }

    /// Create a table from string-like data, first row as headers
    ///
    /// ```
    /// use vlookup_sheet::TableData;
    ///
    /// let table = TableData::from_data(vec![
    ///     vec!["ID", "Name"],
    ///     vec!["1", "Alice"],
    /// ]);
    /// assert_eq!(table.headers(), ["ID", "Name"]);
    /// assert_eq!(table.row_count(), 1);
    /// ```
    #[must_use]
    pub fn from_data<T: Into<String>>(data: Vec<Vec<T>>) -> Self {
        let mut rows = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect::<Vec<String>>());
        match rows.next() {
            Some(headers) => TableData::new(headers, rows.collect()),
            None => TableData::empty(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (the header row is not counted)
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    /// True when the table has no headers or no data rows.
    ///
    /// Parsers return such tables without error; callers decide whether
    /// they are acceptable.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() || self.rows.is_empty()
    }

    /// Position of the first header equal to `name`
    #[must_use]
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Precompute the header name to position map for this table.
    #[must_use]
    pub fn column_index(&self) -> ColumnIndex<'_> {
        ColumnIndex::new(&self.headers)
    }

    /// Consume the table, returning headers and rows
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<String>>) {
        (self.headers, self.rows)
    }
}

/// Header name to column position lookup.
///
/// When a header appears more than once the first position wins.
#[derive(Debug, Clone)]
pub struct ColumnIndex<'a> {
    positions: HashMap<&'a str, usize>,
}

impl<'a> ColumnIndex<'a> {
    #[must_use]
    pub fn new(headers: &'a [String]) -> Self {
        let mut positions = HashMap::with_capacity(headers.len());
        for (i, name) in headers.iter().enumerate() {
            positions.entry(name.as_str()).or_insert(i);
        }
        ColumnIndex { positions }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Resolve a column name, failing with `InvalidColumn` for `side`.
    pub fn resolve(&self, name: &str, side: Side) -> Result<usize> {
        self.get(name).ok_or_else(|| SheetError::InvalidColumn {
            column: name.to_string(),
            side,
        })
    }
}

/// A loaded, named source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// File name, or [`PASTED_SOURCE_NAME`] for pasted text
    pub name: String,
    pub data: TableData,
}

impl Table {
    #[must_use]
    pub fn new(name: impl Into<String>, data: TableData) -> Self {
        Table {
            name: name.into(),
            data,
        }
    }

    /// Reject tables without headers or data rows.
    pub fn ensure_populated(self) -> Result<Self> {
        if self.data.is_empty() {
            return Err(SheetError::EmptyOrInvalidTable { name: self.name });
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reconciles_rows() {
        let table = TableData::from_data(vec![
            vec!["a", "b", "c", "d"],
            vec!["1", "2"],
            vec!["1", "2", "3", "4", "5", "6"],
        ]);

        assert_eq!(table.rows()[0], ["1", "2", "", ""]);
        assert_eq!(table.rows()[1], ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_from_data_empty() {
        let table = TableData::from_data(Vec::<Vec<String>>::new());
        assert_eq!(table, TableData::empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_headers_only_is_empty() {
        let table = TableData::from_data(vec![vec!["a", "b"]]);
        assert_eq!(table.col_count(), 2);
        assert!(table.is_empty());
    }

    #[test]
    fn test_column_index_first_duplicate_wins() {
        let table = TableData::from_data(vec![vec!["ID", "Name", "ID"], vec!["1", "A", "2"]]);
        let index = table.column_index();

        assert_eq!(index.get("ID"), Some(0));
        assert_eq!(index.get("Name"), Some(1));
        assert_eq!(index.get("id"), None);
        assert_eq!(table.column_position("ID"), Some(0));
    }

    #[test]
    fn test_resolve_reports_side() {
        let table = TableData::from_data(vec![vec!["ID"]]);
        let err = table.column_index().resolve("Score", Side::Right).unwrap_err();

        assert!(matches!(
            err,
            SheetError::InvalidColumn { ref column, side: Side::Right } if column == "Score"
        ));
        assert_eq!(err.to_string(), "Column 'Score' not found in right table");
    }

    #[test]
    fn test_deserialize_reconciles() {
        let json = r#"{"headers":["a","b"],"rows":[["1"],["1","2","3"]]}"#;
        let table: TableData = serde_json::from_str(json).unwrap();

        assert_eq!(table.rows(), [vec!["1", ""], vec!["1", "2"]]);
    }

    #[test]
    fn test_side_parse() {
        assert_eq!("Left".parse::<Side>().unwrap(), Side::Left);
        assert_eq!(" right ".parse::<Side>().unwrap(), Side::Right);
        assert!("middle".parse::<Side>().is_err());
    }

    #[test]
    fn test_ensure_populated() {
        let ok = Table::new("a.csv", TableData::from_data(vec![vec!["x"], vec!["1"]]));
        assert!(ok.ensure_populated().is_ok());

        let err = Table::new(PASTED_SOURCE_NAME, TableData::empty())
            .ensure_populated()
            .unwrap_err();
        assert!(matches!(err, SheetError::EmptyOrInvalidTable { ref name } if name == "Pasted Data"));
    }
}
