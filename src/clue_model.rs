//! # Clue Data Model
//!
//! Types shared by the local log, the row writer and the bot handlers.

use chrono::NaiveDate;

/// Date format used in the clue file and the spreadsheet
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A clue as it is persisted: who sent it, when, and the text itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClueRecord {
    pub date: NaiveDate,
    /// Sender display name (Telegram first name)
    pub sender: String,
    pub text: String,
}

impl ClueRecord {
    pub fn new(date: NaiveDate, sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            date,
            sender: sender.into(),
            text: text.into(),
        }
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// What the row writer appends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteMode {
    /// Enumerated clues, one row each, in message order
    Batch(Vec<String>),
    /// A free-form clue, always exactly one row
    Special(String),
}

impl WriteMode {
    /// Number of rows this write occupies
    pub fn row_count(&self) -> usize {
        match self {
            WriteMode::Batch(clues) => clues.len(),
            WriteMode::Special(_) => 1,
        }
    }

    /// Column 2 values, top to bottom
    pub fn clue_cells(&self) -> Vec<String> {
        match self {
            WriteMode::Batch(clues) => clues.clone(),
            WriteMode::Special(text) => vec![text.clone()],
        }
    }
}

/// Inclusive, 1-based span of spreadsheet rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub first: usize,
    pub last: usize,
}

impl RowRange {
    /// Rows that follow `existing_rows` for a write of `mode`
    ///
    /// Returns `None` for an empty batch.
    pub fn after(existing_rows: usize, mode: &WriteMode) -> Option<Self> {
        let count = mode.row_count();
        if count == 0 {
            return None;
        }
        Some(Self {
            first: existing_rows + 1,
            last: existing_rows + count,
        })
    }

    pub fn len(&self) -> usize {
        self.last + 1 - self.first
    }

    pub fn is_empty(&self) -> bool {
        self.last < self.first
    }

    /// Single-column slice of this range
    pub fn column(&self, column: usize) -> CellRange {
        CellRange {
            rows: *self,
            column,
        }
    }
}

/// A contiguous block of cells in one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub rows: RowRange,
    /// 1-based column index
    pub column: usize,
}

impl CellRange {
    /// A1 notation including the quoted tab name, e.g. `'Clues'!B11:B13`
    pub fn a1(&self, tab: &str) -> String {
        let col = column_letters(self.column);
        format!(
            "'{}'!{col}{}:{col}{}",
            tab.replace('\'', "''"),
            self.rows.first,
            self.rows.last
        )
    }
}

/// Spreadsheet column letters for a 1-based index (1 → A, 27 → AA)
pub fn column_letters(mut column: usize) -> String {
    let mut letters = Vec::new();
    while column > 0 {
        let rem = (column - 1) % 26;
        letters.push(b'A' + rem as u8);
        column = (column - 1) / 26;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}
