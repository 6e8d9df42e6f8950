//! Comma-separated text in and out.
//!
//! Reading is a hand-written two-state scanner so that line-break collapsing
//! and quote handling follow the rules below exactly; writing goes through the
//! `csv` crate.
//!
//! | state    | `"`          | `""`          | `,`       | `\r` / `\n` | other  |
//! |----------|--------------|---------------|-----------|-------------|--------|
//! | Unquoted | open quote   | open quote    | end field | end row     | append |
//! | Quoted   | close quote  | append `"`    | append    | append      | append |
//!
//! "End row" is ignored when the previous character was itself `\r` or `\n`,
//! so any run of adjacent line-break characters counts as one break.

use crate::error::{Result, SheetError};
use crate::sanitize;
use crate::table::TableData;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted = 0,
    Quoted = 1,
}

/// Input character class. `EscapedQuote` is a `"` immediately followed by
/// another `"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    Quote = 0,
    EscapedQuote = 1,
    Comma = 2,
    LineBreak = 3,
    Other = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    /// Consume the character without emitting anything.
    Skip,
    /// Append the character to the current field.
    Append,
    /// Append a single `"` and consume both quote characters.
    AppendQuote,
    EndField,
    /// End the field and the row, unless the previous character was a line break.
    EndRow,
}

const TRANSITIONS: [[(Action, State); 5]; 2] = [
    // Unquoted
    [
        (Action::Skip, State::Quoted),
        (Action::Skip, State::Quoted),
        (Action::EndField, State::Unquoted),
        (Action::EndRow, State::Unquoted),
        (Action::Append, State::Unquoted),
    ],
    // Quoted
    [
        (Action::Skip, State::Unquoted),
        (Action::AppendQuote, State::Quoted),
        (Action::Append, State::Quoted),
        (Action::Append, State::Quoted),
        (Action::Append, State::Quoted),
    ],
];

fn transition(state: State, class: CharClass) -> (Action, State) {
    TRANSITIONS[state as usize][class as usize]
}

fn classify(c: char, next: Option<char>) -> CharClass {
    match c {
        '"' if next == Some('"') => CharClass::EscapedQuote,
        '"' => CharClass::Quote,
        ',' => CharClass::Comma,
        '\r' | '\n' => CharClass::LineBreak,
        _ => CharClass::Other,
    }
}

fn is_line_break(c: char) -> bool {
    c == '\r' || c == '\n'
}

/// Split text into raw rows of fields, before any sanitizing.
fn scan_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut state = State::Unquoted;
    let mut prev: Option<char> = None;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let (action, next_state) = transition(state, classify(c, chars.peek().copied()));
        match action {
            Action::Skip => {}
            Action::Append => field.push(c),
            Action::AppendQuote => {
                field.push('"');
                chars.next();
            }
            Action::EndField => row.push(std::mem::take(&mut field)),
            Action::EndRow => {
                if !prev.is_some_and(is_line_break) {
                    row.push(std::mem::take(&mut field));
                    rows.push(std::mem::take(&mut row));
                }
            }
        }
        state = next_state;
        prev = Some(c);
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

impl TableData {
    /// Parse comma-separated text; the first non-blank row becomes the headers.
    ///
    /// Never fails: text without any non-blank row yields the empty table.
    ///
    /// ```
    /// use vlookup_sheet::TableData;
    ///
    /// let table = TableData::from_csv_str("ID,Quote\n1,\"He said \"\"hi\"\"\"\n");
    /// assert_eq!(table.headers(), ["ID", "Quote"]);
    /// assert_eq!(table.rows()[0][1], "He said \"hi\"");
    /// ```
    #[must_use]
    pub fn from_csv_str(text: &str) -> Self {
        let raw = scan_rows(text);
        tracing::debug!(chars = text.len(), raw_rows = raw.len(), "scanned csv text");
        sanitize::into_table(raw, sanitize::is_empty_line)
    }

    /// Render the table as comma-separated text.
    ///
    /// Cells containing `,`, `"`, `\r` or `\n` are quoted with inner quotes
    /// doubled. Rows are separated by `\n` with no trailing line break.
    pub fn to_csv_string(&self) -> Result<String> {
        if self.headers().is_empty() && self.rows().is_empty() {
            return Ok(String::new());
        }

        let mut writer = ::csv::WriterBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .quote_style(::csv::QuoteStyle::Necessary)
            .terminator(::csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(self.headers()).map_err(serialize_error)?;
        for row in self.rows() {
            writer.write_record(row).map_err(serialize_error)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| SheetError::Serialization(e.to_string()))?;
        let mut text =
            String::from_utf8(bytes).map_err(|e| SheetError::Serialization(e.to_string()))?;

        if text.ends_with('\n') {
            text.pop();
        }
        Ok(text)
    }
}

fn serialize_error(e: ::csv::Error) -> SheetError {
    SheetError::Serialization(e.to_string())
}
