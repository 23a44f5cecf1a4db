//! In-memory spreadsheet used by the integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use crossiebot::clue_model::CellRange;
use crossiebot::errors::CrossieError;
use crossiebot::sheets::{Spreadsheet, Worksheet};

#[derive(Default)]
struct Inner {
    tabs: HashMap<String, Vec<Vec<String>>>,
    opened: Vec<String>,
    updates: Vec<(String, CellRange)>,
    fail_open: bool,
    fail_update_number: Option<usize>,
}

/// Cloneable handle; clones share the same tabs
#[derive(Clone, Default)]
pub struct MemorySpreadsheet {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySpreadsheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab pre-filled with `rows` rows of dummy data
    pub fn with_rows(self, tab: &str, rows: usize) -> Self {
        let filler = (1..=rows)
            .map(|i| vec![format!("2020-01-{:02}", i % 28 + 1), format!("old clue {i} (4)"), "Old".to_string()])
            .collect();
        self.inner.lock().unwrap().tabs.insert(tab.to_string(), filler);
        self
    }

    pub fn failing_open(self) -> Self {
        self.inner.lock().unwrap().fail_open = true;
        self
    }

    /// Fail the n-th (1-based) column update
    pub fn failing_update(self, n: usize) -> Self {
        self.inner.lock().unwrap().fail_update_number = Some(n);
        self
    }

    pub fn rows(&self, tab: &str) -> Vec<Vec<String>> {
        self.inner.lock().unwrap().tabs.get(tab).cloned().unwrap_or_default()
    }

    pub fn row(&self, tab: &str, number: usize) -> Vec<String> {
        self.rows(tab)[number - 1].clone()
    }

    pub fn opened(&self) -> Vec<String> {
        self.inner.lock().unwrap().opened.clone()
    }

    pub fn updates(&self) -> Vec<(String, CellRange)> {
        self.inner.lock().unwrap().updates.clone()
    }
}

#[async_trait]
impl Spreadsheet for MemorySpreadsheet {
    async fn worksheet(&self, tab: &str) -> Result<Box<dyn Worksheet>, CrossieError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.fail_open {
            return Err(CrossieError::Auth("invalid_grant".to_string()));
        }
        inner.opened.push(tab.to_string());
        inner.tabs.entry(tab.to_string()).or_default();
        Ok(Box::new(MemoryWorksheet {
            inner: Arc::clone(&self.inner),
            tab: tab.to_string(),
        }))
    }
}

struct MemoryWorksheet {
    inner: Arc<Mutex<Inner>>,
    tab: String,
}

#[async_trait]
impl Worksheet for MemoryWorksheet {
    async fn row_count(&self) -> Result<usize, CrossieError> {
        Ok(self.inner.lock().unwrap().tabs[&self.tab].len())
    }

    async fn update_cells(&self, range: CellRange, values: Vec<String>) -> Result<(), CrossieError> {
        let mut inner = self.inner.lock().unwrap();
        inner.updates.push((self.tab.clone(), range));
        if inner.fail_update_number == Some(inner.updates.len()) {
            return Err(CrossieError::Http { status: 503, message: "backend unavailable".to_string() });
        }
        assert_eq!(values.len(), range.rows.len(), "one value per row");

        let rows = inner.tabs.get_mut(&self.tab).unwrap();
        for (offset, value) in values.into_iter().enumerate() {
            let row_index = range.rows.first - 1 + offset;
            while rows.len() <= row_index {
                rows.push(Vec::new());
            }
            let row = &mut rows[row_index];
            while row.len() < range.column {
                row.push(String::new());
            }
            row[range.column - 1] = value;
        }
        Ok(())
    }
}
