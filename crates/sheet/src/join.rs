//! Single-key lookup join (VLOOKUP).
//!
//! Two tie-breaks are part of the contract and are covered by tests:
//! - a header name that occurs more than once resolves to its **first** position;
//! - a match key that occurs in more than one right row resolves to the **last** row.
//!
//! Keys are compared as exact strings. Nothing is trimmed, case-folded or
//! parsed as a number, so callers wanting looser matching must normalize first.

use crate::error::{Result, SheetError};
use crate::table::{Side, TableData};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Cell text written when a left row has no match in the right table.
pub const NOT_FOUND: &str = "N/A";

/// The three columns a lookup needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinSpec {
    /// Key column in the left table
    pub lookup_column: String,
    /// Key column in the right table
    pub match_column: String,
    /// Right table column copied into the result
    pub return_column: String,
}

impl JoinSpec {
    #[must_use]
    pub fn new(
        lookup_column: impl Into<String>,
        match_column: impl Into<String>,
        return_column: impl Into<String>,
    ) -> Self {
        JoinSpec {
            lookup_column: lookup_column.into(),
            match_column: match_column.into(),
            return_column: return_column.into(),
        }
    }
}

/// Column positions resolved for one join.
#[derive(Debug, Clone, Copy)]
struct ResolvedColumns {
    lookup: usize,
    matched: usize,
    returned: usize,
}

fn resolve(left: &TableData, right: &TableData, spec: &JoinSpec) -> Result<ResolvedColumns> {
    let left_index = left.column_index();
    let right_index = right.column_index();

    // blank headers exist (untitled spreadsheet columns) but are never selectable
    let checked = |name: &str, side: Side| -> Result<usize> {
        if name.is_empty() {
            return Err(SheetError::InvalidColumn {
                column: String::new(),
                side,
            });
        }
        match side {
            Side::Left => left_index.resolve(name, side),
            Side::Right => right_index.resolve(name, side),
        }
    };

    let lookup = checked(&spec.lookup_column, Side::Left)?;
    let matched = checked(&spec.match_column, Side::Right)?;
    let returned = checked(&spec.return_column, Side::Right)?;

    Ok(ResolvedColumns {
        lookup,
        matched,
        returned,
    })
}

/// Index right rows by their match cell. Later rows replace earlier ones.
fn index_by_key(rows: &[Vec<String>], key_col: usize) -> HashMap<&str, &[String]> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        index.insert(row[key_col].as_str(), row.as_slice());
    }
    index
}

impl TableData {
    /// Left join `right` onto this table by a single key column.
    ///
    /// The result has this table's headers plus `spec.return_column`, and one
    /// row per row of this table, in order. Unmatched rows get [`NOT_FOUND`].
    ///
    /// ```
    /// use vlookup_sheet::{JoinSpec, TableData};
    ///
    /// let people = TableData::from_data(vec![vec!["ID", "Name"], vec!["1", "A"], vec!["3", "C"]]);
    /// let scores = TableData::from_data(vec![vec!["ID", "Score"], vec!["1", "80"]]);
    ///
    /// let merged = people.vlookup(&scores, &JoinSpec::new("ID", "ID", "Score")).unwrap();
    /// assert_eq!(merged.headers(), ["ID", "Name", "Score"]);
    /// assert_eq!(merged.rows()[1], ["3", "C", "N/A"]);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `InvalidColumn` if a spec column is empty or not a header of
    /// its table.
    pub fn vlookup(&self, right: &TableData, spec: &JoinSpec) -> Result<TableData> {
        let cols = resolve(self, right, spec)?;
        let index = index_by_key(right.rows(), cols.matched);

        let mut headers = self.headers().to_vec();
        headers.push(spec.return_column.clone());

        let mut matched = 0usize;
        let rows: Vec<Vec<String>> = self
            .rows()
            .iter()
            .map(|left_row| {
                let value = match index.get(left_row[cols.lookup].as_str()) {
                    Some(right_row) => {
                        matched += 1;
                        right_row[cols.returned].clone()
                    }
                    None => NOT_FOUND.to_string(),
                };
                let mut row = Vec::with_capacity(headers.len());
                row.extend_from_slice(left_row);
                row.push(value);
                row
            })
            .collect();

        tracing::info!(
            rows = rows.len(),
            matched,
            unmatched = rows.len() - matched,
            "lookup join complete"
        );

        Ok(TableData::new(headers, rows))
    }
}

/// Left join `right` onto `left`; see [`TableData::vlookup`].
pub fn vlookup(left: &TableData, right: &TableData, spec: &JoinSpec) -> Result<TableData> {
    left.vlookup(right, spec)
}

impl JoinSpec {
    /// Check the spec against a pair of tables without joining.
    pub fn validate(&self, left: &TableData, right: &TableData) -> Result<()> {
        resolve(left, right, self).map(|_| ())
    }

    /// The first empty selection, by its display name.
    pub(crate) fn first_missing(&self) -> Option<&'static str> {
        if self.lookup_column.is_empty() {
            Some("lookup column")
        } else if self.match_column.is_empty() {
            Some("match column")
        } else if self.return_column.is_empty() {
            Some("return column")
        } else {
            None
        }
    }
}
