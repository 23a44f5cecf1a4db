//! # Local Clue Log
//!
//! Append-only, tab-separated record of every clue the bot has seen:
//! `date<TAB>sender<TAB>clue`, one record per line.

use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::clue_model::{ClueRecord, DATE_FORMAT};
use crate::errors::CrossieError;

/// Handle on the clue file
#[derive(Debug, Clone)]
pub struct ClueLog {
    path: PathBuf,
}

impl ClueLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append records, creating the file if needed
    ///
    /// The file is opened once per call and flushed before it is closed.
    pub fn append(&self, records: &[ClueRecord]) -> Result<(), CrossieError> {
        if records.is_empty() {
            return Ok(());
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| CrossieError::Io(format!("{}: {e}", self.path.display())))?;
        let mut writer = BufWriter::new(file);

        for record in records {
            writeln!(writer, "{}", format_line(record))?;
        }
        writer.flush()?;

        info!(
            path = %self.path.display(),
            records = records.len(),
            "Clues appended to local log"
        );
        Ok(())
    }

    /// Read every record back, skipping lines that do not parse
    pub fn read_all(&self) -> Result<Vec<ClueRecord>, CrossieError> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        for (line_number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            match parse_line(&line) {
                Some(record) => records.push(record),
                None => debug!(line_number, "Skipping unparsable clue log line"),
            }
        }
        Ok(records)
    }
}

/// `date\tsender\ttext` with embedded tabs and line breaks escaped
pub fn format_line(record: &ClueRecord) -> String {
    format!(
        "{}\t{}\t{}",
        record.date_string(),
        escape_field(&record.sender),
        escape_field(&record.text)
    )
}

/// Inverse of [`format_line`]
pub fn parse_line(line: &str) -> Option<ClueRecord> {
    let mut fields = line.splitn(3, '\t');
    let date = NaiveDate::parse_from_str(fields.next()?, DATE_FORMAT).ok()?;
    let sender = unescape_field(fields.next()?);
    let text = unescape_field(fields.next()?);
    Some(ClueRecord { date, sender, text })
}

fn escape_field(field: &str) -> String {
    let mut escaped = String::with_capacity(field.len());
    for c in field.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\t' => escaped.push_str("\\t"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn unescape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
