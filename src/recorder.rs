//! Records clues in both stores: the local clue file first, then the spreadsheet.
//!
//! The two writes are independent. A spreadsheet failure after a successful
//! local append is reported but not rolled back.

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::clue_log::ClueLog;
use crate::clue_model::{ClueRecord, RowRange, DATE_FORMAT, WriteMode};
use crate::errors::CrossieError;
use crate::sheets::{RowWriter, Spreadsheet};

/// Which store failed
#[derive(Debug, Clone, PartialEq)]
pub enum RecordFailure {
    /// Nothing was written anywhere
    LocalLog(CrossieError),
    /// The clue file has the records, the spreadsheet may not
    Spreadsheet(CrossieError),
}

impl std::fmt::Display for RecordFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordFailure::LocalLog(e) => write!(f, "local clue log: {e}"),
            RecordFailure::Spreadsheet(e) => write!(f, "spreadsheet: {e}"),
        }
    }
}

impl std::error::Error for RecordFailure {}

/// Result of a successful recording
#[derive(Debug, Clone, PartialEq)]
pub struct RecordOutcome {
    pub records: Vec<ClueRecord>,
    /// Spreadsheet rows written, `None` when there was nothing to write
    pub rows: Option<RowRange>,
}

/// Writes clue records to the clue file and the spreadsheet
pub struct ClueRecorder<S> {
    log: ClueLog,
    writer: RowWriter<S>,
    clue_tab: String,
    special_tab: String,
}

impl<S: Spreadsheet> ClueRecorder<S> {
    pub fn new(
        log: ClueLog,
        spreadsheet: S,
        clue_tab: impl Into<String>,
        special_tab: impl Into<String>,
    ) -> Self {
        Self {
            log,
            writer: RowWriter::new(spreadsheet),
            clue_tab: clue_tab.into(),
            special_tab: special_tab.into(),
        }
    }

    pub fn log(&self) -> &ClueLog {
        &self.log
    }

    /// Record enumerated clues from one message, one row each
    pub async fn record_batch(
        &self,
        date: NaiveDate,
        sender: &str,
        clues: Vec<String>,
    ) -> Result<RecordOutcome, RecordFailure> {
        let tab = self.clue_tab.clone();
        self.record(&tab, date, sender, WriteMode::Batch(clues)).await
    }

    /// Record a free-form clue as a single row
    pub async fn record_special(
        &self,
        date: NaiveDate,
        sender: &str,
        text: String,
    ) -> Result<RecordOutcome, RecordFailure> {
        let tab = self.special_tab.clone();
        self.record(&tab, date, sender, WriteMode::Special(text)).await
    }

    async fn record(
        &self,
        tab: &str,
        date: NaiveDate,
        sender: &str,
        mode: WriteMode,
    ) -> Result<RecordOutcome, RecordFailure> {
        let records: Vec<ClueRecord> = mode
            .clue_cells()
            .into_iter()
            .map(|text| ClueRecord::new(date, sender, text))
            .collect();

        if let Err(e) = self.log.append(&records) {
            error!(sender, tab, error = %e, "Failed to append clues to local log");
            return Err(RecordFailure::LocalLog(e));
        }

        let date = date.format(DATE_FORMAT).to_string();
        match self.writer.append(tab, &date, sender, &mode).await {
            Ok(rows) => {
                info!(sender, tab, clue_count = records.len(), "Clues recorded");
                Ok(RecordOutcome { records, rows })
            }
            Err(e) => {
                warn!(
                    sender,
                    tab,
                    clue_count = records.len(),
                    error = %e,
                    "Clues are in the local log but not in the spreadsheet"
                );
                Err(RecordFailure::Spreadsheet(e))
            }
        }
    }
}
