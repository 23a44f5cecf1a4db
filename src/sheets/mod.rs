//! Spreadsheet module for recording clues remotely
//!
//! - `auth`: service-account credentials and the OAuth token exchange
//! - `client`: Google Sheets / Drive REST implementation
//! - `row_writer`: appends clue rows after the last used row of a tab

pub mod auth;
pub mod client;
pub mod row_writer;

use async_trait::async_trait;

use crate::clue_model::CellRange;
use crate::errors::CrossieError;

pub use client::GoogleSpreadsheet;
pub use row_writer::RowWriter;

/// A spreadsheet document made of named tabs
#[async_trait]
pub trait Spreadsheet: Send + Sync {
    /// Authenticate and open the named tab
    async fn worksheet(&self, tab: &str) -> Result<Box<dyn Worksheet>, CrossieError>;
}

/// One tab of an opened spreadsheet
#[async_trait]
pub trait Worksheet: Send + Sync {
    /// Number of rows up to and including the last non-empty one
    async fn row_count(&self) -> Result<usize, CrossieError>;

    /// Overwrite a single-column block, top to bottom
    ///
    /// `values` has exactly one entry per row of `range`.
    async fn update_cells(&self, range: CellRange, values: Vec<String>) -> Result<(), CrossieError>;
}
