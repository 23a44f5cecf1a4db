//! Google Sheets REST client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::auth::{fetch_access_token, ServiceAccountKey};
use super::{Spreadsheet, Worksheet};
use crate::circuit_breaker::CircuitBreaker;
use crate::clue_model::CellRange;
use crate::config::{BotConfig, RecoveryConfig, SpreadsheetRef};
use crate::errors::CrossieError;
use crate::retry::with_retry;

pub const SHEETS_API: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DRIVE_FILES_API: &str = "https://www.googleapis.com/drive/v3/files";
const SPREADSHEET_MIME: &str = "application/vnd.google-apps.spreadsheet";

/// Spreadsheet backed by the Google Sheets API
///
/// Every call to [`Spreadsheet::worksheet`] authenticates from scratch.
pub struct GoogleSpreadsheet {
    http: Client,
    key: ServiceAccountKey,
    spreadsheet: SpreadsheetRef,
    recovery: RecoveryConfig,
    breaker: Arc<CircuitBreaker>,
}

impl GoogleSpreadsheet {
    pub fn new(
        key: ServiceAccountKey,
        spreadsheet: SpreadsheetRef,
        recovery: RecoveryConfig,
    ) -> Result<Self, CrossieError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(recovery.request_timeout_secs))
            .build()?;
        let breaker = Arc::new(CircuitBreaker::new(recovery.clone()));
        Ok(Self {
            http,
            key,
            spreadsheet,
            recovery,
            breaker,
        })
    }

    /// Build the client from the bot configuration, reading the key file
    pub fn from_config(config: &BotConfig) -> Result<Self, CrossieError> {
        let key = ServiceAccountKey::from_file(&config.credentials_path)?;
        Self::new(key, config.spreadsheet.clone(), config.recovery.clone())
    }

    async fn resolve_id(&self, token: &str) -> Result<String, CrossieError> {
        let name = match &self.spreadsheet {
            SpreadsheetRef::Id(id) => return Ok(id.clone()),
            SpreadsheetRef::Name(name) => name,
        };

        let query = format!(
            "name = '{}' and mimeType = '{SPREADSHEET_MIME}' and trashed = false",
            name.replace('\\', "\\\\").replace('\'', "\\'")
        );
        let files: DriveFileList = with_retry(&self.recovery, &self.breaker, "drive.files.list", || async {
            let response = self
                .http
                .get(DRIVE_FILES_API)
                .bearer_auth(token)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", "files(id,name)"),
                    ("supportsAllDrives", "true"),
                    ("includeItemsFromAllDrives", "true"),
                ])
                .send()
                .await?;
            Ok::<DriveFileList, CrossieError>(check_status(response).await?.json().await?)
        })
        .await?;

        let id = files
            .files
            .into_iter()
            .next()
            .map(|f| f.id)
            .ok_or_else(|| CrossieError::Sheet(format!("spreadsheet `{name}` not found")))?;
        debug!(spreadsheet = %name, spreadsheet_id = %id, "Resolved spreadsheet by name");
        Ok(id)
    }
}

#[async_trait]
impl Spreadsheet for GoogleSpreadsheet {
    async fn worksheet(&self, tab: &str) -> Result<Box<dyn Worksheet>, CrossieError> {
        let token = with_retry(&self.recovery, &self.breaker, "oauth.token", || {
            fetch_access_token(&self.http, &self.key)
        })
        .await?;
        let spreadsheet_id = self.resolve_id(&token).await?;

        info!(tab, spreadsheet_id = %spreadsheet_id, "Opened worksheet");
        Ok(Box::new(GoogleWorksheet {
            http: self.http.clone(),
            token,
            spreadsheet_id,
            tab: tab.to_string(),
            recovery: self.recovery.clone(),
            breaker: Arc::clone(&self.breaker),
        }))
    }
}

/// One authenticated tab
pub struct GoogleWorksheet {
    http: Client,
    token: String,
    spreadsheet_id: String,
    tab: String,
    recovery: RecoveryConfig,
    breaker: Arc<CircuitBreaker>,
}

impl GoogleWorksheet {
    fn values_url(&self, range: &str) -> Result<Url, CrossieError> {
        values_url(&self.spreadsheet_id, range)
    }
}

#[async_trait]
impl Worksheet for GoogleWorksheet {
    async fn row_count(&self) -> Result<usize, CrossieError> {
        let url = self.values_url(&quote_tab(&self.tab))?;
        let range: ValueRange = with_retry(&self.recovery, &self.breaker, "values.get", || async {
            let response = self
                .http
                .get(url.clone())
                .bearer_auth(&self.token)
                .query(&[("majorDimension", "ROWS")])
                .send()
                .await?;
            Ok::<ValueRange, CrossieError>(check_status(response).await?.json().await?)
        })
        .await?;

        let rows = range.values.len();
        debug!(tab = %self.tab, rows, "Read worksheet rows");
        Ok(rows)
    }

    async fn update_cells(&self, range: CellRange, values: Vec<String>) -> Result<(), CrossieError> {
        if values.len() != range.rows.len() {
            return Err(CrossieError::Sheet(format!(
                "{} values for a {}-row range",
                values.len(),
                range.rows.len()
            )));
        }

        let a1 = range.a1(&self.tab);
        let url = self.values_url(&a1)?;
        let body = json!({
            "range": a1,
            "majorDimension": "ROWS",
            "values": values.iter().map(|v| vec![v]).collect::<Vec<_>>(),
        });

        with_retry(&self.recovery, &self.breaker, "values.update", || async {
            let response = self
                .http
                .put(url.clone())
                .bearer_auth(&self.token)
                .query(&[("valueInputOption", "RAW")])
                .json(&body)
                .send()
                .await?;
            check_status(response).await?;
            Ok::<(), CrossieError>(())
        })
        .await?;

        debug!(range = %a1, cells = values.len(), "Updated cells");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct DriveFileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

/// `'Tab'` with embedded quotes doubled, as A1 notation wants
pub fn quote_tab(tab: &str) -> String {
    format!("'{}'", tab.replace('\'', "''"))
}

/// `.../spreadsheets/{id}/values/{range}` with the range percent-encoded
pub fn values_url(spreadsheet_id: &str, range: &str) -> Result<Url, CrossieError> {
    let mut url = Url::parse(SHEETS_API).map_err(|e| CrossieError::Sheet(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| CrossieError::Sheet("sheets API url cannot be a base".to_string()))?
        .push(spreadsheet_id)
        .push("values")
        .push(range);
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response, CrossieError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(CrossieError::Http {
        status: status.as_u16(),
        message,
    })
}
