//! Appends clue rows to a spreadsheet tab.
//!
//! Columns: 1 = date, 2 = clue text, 3 = sender. New rows always start right
//! after the last used row; nothing already in the tab is overwritten.

use tracing::{info, warn};

use super::Spreadsheet;
use crate::clue_model::{RowRange, WriteMode};
use crate::errors::CrossieError;

pub const DATE_COLUMN: usize = 1;
pub const CLUE_COLUMN: usize = 2;
pub const SENDER_COLUMN: usize = 3;

/// Row appender over any [`Spreadsheet`]
pub struct RowWriter<S> {
    spreadsheet: S,
}

impl<S: Spreadsheet> RowWriter<S> {
    pub fn new(spreadsheet: S) -> Self {
        Self { spreadsheet }
    }

    /// Append `mode`'s clues to `tab` and return the rows written
    ///
    /// The three columns are written by separate calls; a failure part way
    /// leaves the rows partially filled. An empty batch writes nothing and
    /// returns `None`.
    pub async fn append(
        &self,
        tab: &str,
        date: &str,
        sender: &str,
        mode: &WriteMode,
    ) -> Result<Option<RowRange>, CrossieError> {
        if mode.row_count() == 0 {
            return Ok(None);
        }

        let worksheet = self.spreadsheet.worksheet(tab).await?;
        let existing = worksheet.row_count().await?;
        let Some(rows) = RowRange::after(existing, mode) else {
            return Ok(None);
        };

        let columns = [
            (DATE_COLUMN, vec![date.to_string(); rows.len()]),
            (CLUE_COLUMN, mode.clue_cells()),
            (SENDER_COLUMN, vec![sender.to_string(); rows.len()]),
        ];

        for (written, (column, values)) in columns.into_iter().enumerate() {
            if let Err(e) = worksheet.update_cells(rows.column(column), values).await {
                if written > 0 {
                    warn!(
                        tab,
                        first_row = rows.first,
                        last_row = rows.last,
                        columns_written = written,
                        "Rows left partially filled"
                    );
                }
                return Err(e);
            }
        }

        info!(tab, first_row = rows.first, last_row = rows.last, "Clue rows appended");
        Ok(Some(rows))
    }
}
