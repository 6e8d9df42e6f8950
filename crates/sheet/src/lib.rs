//! Tabular ingest and lookup joins for vlookup
//!
//! Loads two tables from CSV text or spreadsheet files, joins one column of
//! the right table onto the left table by a single key (a VLOOKUP), and
//! exports the result as CSV. All cells are plain text.
//!
//! # Examples
//!
//! ## Parsing CSV
//!
//! ```
//! use vlookup_sheet::TableData;
//!
//! let table = TableData::from_csv_str("Name,City\nAlice,NYC\nBob\n");
//!
//! assert_eq!(table.headers(), ["Name", "City"]);
//! // short rows are padded to the header width
//! assert_eq!(table.rows()[1], ["Bob", ""]);
//! ```
//!
//! ## Joining and exporting
//!
//! ```
//! use vlookup_sheet::{JoinSpec, TableData};
//!
//! let left = TableData::from_csv_str("ID,Name\n1,A\n2,B\n3,C");
//! let right = TableData::from_csv_str("ID,Score\n2,90\n1,80");
//!
//! let merged = left.vlookup(&right, &JoinSpec::new("ID", "ID", "Score")).unwrap();
//! assert_eq!(
//!     merged.to_csv_string().unwrap(),
//!     "ID,Name,Score\n1,A,80\n2,B,90\n3,C,N/A"
//! );
//! ```
//!
//! ## Loading files
//!
//! ```no_run
//! use vlookup_sheet::{load_path, SourceFile};
//!
//! let from_disk = load_path("customers.xlsx").unwrap();
//! let uploaded = SourceFile::new("orders.csv", std::fs::read("orders.csv").unwrap()).load().unwrap();
//! ```
//!
//! ## Sessions
//!
//! [`Workbench`] keeps the state a lookup UI needs: both tables, the column
//! selections, the merged result and the current error message.
//!
//! ```
//! use vlookup_sheet::{Side, Workbench};
//!
//! let mut bench = Workbench::new();
//! bench.load_pasted(Side::Left, "ID,Name\n1,A").unwrap();
//! bench.load_pasted(Side::Right, "ID,Score\n1,80").unwrap();
//! bench.set_lookup_column("ID");
//! bench.set_match_column("ID");
//! bench.set_return_column("Score");
//!
//! bench.merge().unwrap();
//! let export = bench.export().unwrap();
//! assert_eq!(export.file_name, "merged_data.csv");
//! ```

mod cell;
mod csv;
mod error;
mod join;
mod sanitize;
mod session;
mod source;
mod table;
mod xlsx;

/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export join types.
pub use join::{vlookup, JoinSpec, NOT_FOUND};
/// Re-export session types.
pub use session::{Export, ExportOptions, Workbench};
#[cfg(not(target_arch = "wasm32"))]
/// Re-export the path loader (non-WASM only).
pub use source::load_path;
/// Re-export source loading.
pub use source::{load_bytes, SourceFile, SourceFormat};
/// Re-export table types.
pub use table::{ColumnIndex, Side, Table, TableData, PASTED_SOURCE_NAME};
