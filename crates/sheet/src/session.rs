//! Session state behind the lookup UI.
//!
//! A [`Workbench`] holds the two loaded tables, the column selections, the
//! merged result and the one error message currently shown to the user.
//! Every operation clears the previous error first. Anything that could make a
//! merged result stale (a load, a failed load, a clear, a new selection)
//! drops it.

use crate::error::{Result, SheetError};
use crate::join::JoinSpec;
use crate::source::SourceFile;
use crate::table::{Side, Table, TableData, PASTED_SOURCE_NAME};
use std::future::Future;

/// Options for exporting a merged table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Suggested download file name (default: `merged_data.csv`)
    pub file_name: String,
    /// MIME type declared for the download (default: `text/csv;charset=utf-8`)
    pub content_type: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            file_name: "merged_data.csv".to_string(),
            content_type: "text/csv;charset=utf-8".to_string(),
        }
    }
}

impl ExportOptions {
    /// Set the download file name
    #[must_use]
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }

    /// Set the declared content type
    #[must_use]
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = content_type.to_string();
        self
    }
}

/// A serialized merged table ready to be offered as a download.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Export {
    pub file_name: String,
    pub content_type: String,
    pub contents: String,
}

/// Tables, selections and results of one lookup session.
#[derive(Debug, Default)]
pub struct Workbench {
    left: Option<Table>,
    right: Option<Table>,
    spec: JoinSpec,
    merged: Option<TableData>,
    error: Option<String>,
}

impl Workbench {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, side: Side) -> &mut Option<Table> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// The loaded table for `side`, if any
    #[must_use]
    pub fn table(&self, side: Side) -> Option<&Table> {
        match side {
            Side::Left => self.left.as_ref(),
            Side::Right => self.right.as_ref(),
        }
    }

    /// Headers of the loaded table for `side`; empty when nothing is loaded
    #[must_use]
    pub fn headers(&self, side: Side) -> &[String] {
        self.table(side).map(|t| t.data.headers()).unwrap_or(&[])
    }

    #[must_use]
    pub fn merged(&self) -> Option<&TableData> {
        self.merged.as_ref()
    }

    /// The message of the most recent failure, until the next operation
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Remember a failure as the current message and hand it back.
    fn fail<T>(&mut self, err: SheetError) -> Result<T> {
        tracing::warn!(error = %err, "operation failed");
        self.error = Some(err.to_string());
        Err(err)
    }

    fn reset_selections(&mut self, side: Side) {
        match side {
            Side::Left => self.spec.lookup_column.clear(),
            Side::Right => {
                self.spec.match_column.clear();
                self.spec.return_column.clear();
            }
        }
    }

    /// Put a parsed table in `side`, or leave the slot empty on failure.
    fn install(&mut self, side: Side, name: &str, parsed: Result<TableData>) -> Result<&Table> {
        self.error = None;
        self.merged = None;
        self.reset_selections(side);
        *self.slot_mut(side) = None;

        let table = match parsed.and_then(|data| Table::new(name, data).ensure_populated()) {
            Ok(table) => table,
            Err(e) => return self.fail(e),
        };

        tracing::info!(
            %side,
            name = %table.name,
            columns = table.data.col_count(),
            rows = table.data.row_count(),
            "table loaded"
        );
        Ok(&*self.slot_mut(side).insert(table))
    }

    /// Load a file into `side`, replacing whatever was there.
    ///
    /// # Errors
    ///
    /// Fails for unsupported extensions, unreadable spreadsheets, and tables
    /// without headers or data rows. The slot is left empty on failure.
    pub fn load_source(&mut self, side: Side, file: &SourceFile) -> Result<&Table> {
        let parsed = file.load();
        self.install(side, &file.name, parsed)
    }

    /// Load pasted CSV text into `side` under the name "Pasted Data".
    pub fn load_pasted(&mut self, side: Side, text: &str) -> Result<&Table> {
        let parsed = Ok(TableData::from_csv_str(text));
        self.install(side, PASTED_SOURCE_NAME, parsed)
    }

    /// Remove the table in `side` along with its selections and any merged result.
    pub fn clear(&mut self, side: Side) {
        self.error = None;
        self.merged = None;
        self.reset_selections(side);
        *self.slot_mut(side) = None;
    }

    pub fn set_lookup_column(&mut self, column: &str) {
        self.error = None;
        self.spec.lookup_column = column.to_string();
        self.merged = None;
    }

    pub fn set_match_column(&mut self, column: &str) {
        self.error = None;
        self.spec.match_column = column.to_string();
        self.merged = None;
    }

    pub fn set_return_column(&mut self, column: &str) {
        self.error = None;
        self.spec.return_column = column.to_string();
        self.merged = None;
    }

    /// The current selections, once all three are made
    #[must_use]
    pub fn join_spec(&self) -> Option<&JoinSpec> {
        match self.spec.first_missing() {
            None => Some(&self.spec),
            Some(_) => None,
        }
    }

    /// True when both tables are loaded and all three columns are selected
    #[must_use]
    pub fn can_merge(&self) -> bool {
        self.left.is_some() && self.right.is_some() && self.join_spec().is_some()
    }

    fn compute_merge(&self) -> Result<TableData> {
        let left = self.left.as_ref().ok_or(SheetError::TableNotLoaded(Side::Left))?;
        let right = self
            .right
            .as_ref()
            .ok_or(SheetError::TableNotLoaded(Side::Right))?;
        if let Some(missing) = self.spec.first_missing() {
            return Err(SheetError::MissingSelection(missing));
        }
        left.data.vlookup(&right.data, &self.spec)
    }

    /// Join the loaded tables with the current selections.
    pub fn merge(&mut self) -> Result<&TableData> {
        self.error = None;
        self.merged = None;
        match self.compute_merge() {
            Ok(merged) => Ok(&*self.merged.insert(merged)),
            Err(e) => self.fail(e),
        }
    }

    /// Await `pause` before joining, so the caller's event loop can render a
    /// busy indicator first.
    pub async fn merge_after<F>(&mut self, pause: F) -> Result<&TableData>
    where
        F: Future<Output = ()>,
    {
        self.error = None;
        pause.await;
        self.merge()
    }

    /// Serialize the merged result with default export options.
    pub fn export(&mut self) -> Result<Export> {
        self.export_with(&ExportOptions::default())
    }

    /// Serialize the merged result for download.
    pub fn export_with(&mut self, options: &ExportOptions) -> Result<Export> {
        self.error = None;
        let contents = match self.merged.as_ref() {
            Some(merged) => merged.to_csv_string(),
            None => Err(SheetError::NothingToExport),
        };
        match contents {
            Ok(contents) => Ok(Export {
                file_name: options.file_name.clone(),
                content_type: options.content_type.clone(),
                contents,
            }),
            Err(e) => self.fail(e),
        }
    }
}
