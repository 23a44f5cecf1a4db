//! # Bot Configuration Module
//!
//! This module defines the configuration built once at startup and shared by
//! the router, the clue log and the spreadsheet writer, including recovery
//! settings for remote calls.

use std::path::PathBuf;

use crate::errors::CrossieError;

// Constants for bot configuration
pub const DEFAULT_CLUE_FILE: &str = "./clues.txt";
pub const DEFAULT_SPREADSHEET_NAME: &str = "CrossieClues";
pub const DEFAULT_CLUE_TAB: &str = "Clues";
pub const DEFAULT_SPECIAL_TAB: &str = "Special";
pub const DEFAULT_SHEET_LINK: &str = "https://docs.google.com/spreadsheets/d/1ioipi0GyoEYDEVolcy0Lu1wJBiKZgywQsizrVbLEWqY/edit#gid=94805756";
pub const DEFAULT_KOSHER_STICKER: &str =
    "CAACAgQAAxkBAAEBEg1fFGUi_BrhHa_wjtz2GKyeTRYmYAAC408xAAGV22IvqNvR8y8iGqYaBA";

/// Recovery configuration for remote spreadsheet calls
#[derive(Debug, Clone)]
pub struct RecoveryConfig {
    /// Maximum number of retry attempts per call
    pub max_retries: u32,
    /// Base delay between retries in milliseconds
    pub base_retry_delay_ms: u64,
    /// Maximum delay between retries in milliseconds
    pub max_retry_delay_ms: u64,
    /// Timeout for a single HTTP request in seconds
    pub request_timeout_secs: u64,
    /// Circuit breaker failure threshold
    pub circuit_breaker_threshold: u32,
    /// Circuit breaker reset timeout in seconds
    pub circuit_breaker_reset_secs: u64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_retry_delay_ms: 1000, // 1 second
            max_retry_delay_ms: 10000, // 10 seconds
            request_timeout_secs: 30,
            circuit_breaker_threshold: 5,
            circuit_breaker_reset_secs: 60, // 1 minute
        }
    }
}

/// How the clue matcher scans a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Every enumerated clue in the message, each trimmed to its own text
    #[default]
    Scan,
    /// Greedy leading text, byte-compatible with the historical clue file
    Legacy,
}

impl std::str::FromStr for MatchMode {
    type Err = CrossieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scan" => Ok(MatchMode::Scan),
            "legacy" => Ok(MatchMode::Legacy),
            other => Err(CrossieError::Config(format!(
                "CROSSIE_MATCH_MODE must be `scan` or `legacy`, got `{other}`"
            ))),
        }
    }
}

/// Which spreadsheet document to open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpreadsheetRef {
    /// Document id taken from the spreadsheet URL
    Id(String),
    /// Document title, resolved through Drive
    Name(String),
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Configuration for the bot, constructed once in `main`
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Telegram bot token
    pub bot_token: String,
    /// The only chat allowed to record clues
    pub group_id: i64,
    /// Service-account key file
    pub credentials_path: PathBuf,
    /// Local append-only clue file
    pub clue_file: PathBuf,
    pub spreadsheet: SpreadsheetRef,
    /// Link shown in the help text
    pub sheet_link: String,
    pub clue_tab: String,
    pub special_tab: String,
    pub kosher_sticker: String,
    pub match_mode: MatchMode,
    pub log_file: Option<PathBuf>,
    pub log_format: LogFormat,
    pub recovery: RecoveryConfig,
}

impl BotConfig {
    /// Load the configuration from the process environment
    pub fn from_env() -> Result<Self, CrossieError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load the configuration through an arbitrary key lookup
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CrossieError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |key: &str| {
            get(key).ok_or_else(|| CrossieError::Config(format!("{key} must be set")))
        };

        let bot_token = require("TELEGRAM_BOT_TOKEN")?;
        let group_id = require("CROSSIE_GROUP_ID")?.parse::<i64>().map_err(|e| {
            CrossieError::Config(format!("CROSSIE_GROUP_ID must be a chat id: {e}"))
        })?;
        let credentials_path = PathBuf::from(require("GOOGLE_CREDENTIALS_JSON")?);

        let spreadsheet = match get("CROSSIE_SPREADSHEET_ID") {
            Some(id) => SpreadsheetRef::Id(id),
            None => SpreadsheetRef::Name(
                get("CROSSIE_SPREADSHEET_NAME").unwrap_or_else(|| DEFAULT_SPREADSHEET_NAME.to_string()),
            ),
        };

        let match_mode = match get("CROSSIE_MATCH_MODE") {
            Some(mode) => mode.parse()?,
            None => MatchMode::default(),
        };

        let log_format = get("CROSSIE_LOG_FORMAT").map(|f| f.to_ascii_lowercase());
        let log_format = match log_format.as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(CrossieError::Config(format!(
                    "CROSSIE_LOG_FORMAT must be `text` or `json`, got `{other}`"
                )))
            }
        };

        let mut recovery = RecoveryConfig::default();
        if let Some(retries) = get("CROSSIE_MAX_RETRIES") {
            recovery.max_retries = retries.parse().map_err(|e| {
                CrossieError::Config(format!("CROSSIE_MAX_RETRIES must be a number: {e}"))
            })?;
        }

        Ok(Self {
            bot_token,
            group_id,
            credentials_path,
            clue_file: PathBuf::from(get("CROSSIE_CLUE_FILE").unwrap_or_else(|| DEFAULT_CLUE_FILE.to_string())),
            spreadsheet,
            sheet_link: get("CROSSIE_SHEET_LINK").unwrap_or_else(|| DEFAULT_SHEET_LINK.to_string()),
            clue_tab: get("CROSSIE_CLUE_TAB").unwrap_or_else(|| DEFAULT_CLUE_TAB.to_string()),
            special_tab: get("CROSSIE_SPECIAL_TAB").unwrap_or_else(|| DEFAULT_SPECIAL_TAB.to_string()),
            kosher_sticker: get("CROSSIE_KOSHER_STICKER").unwrap_or_else(|| DEFAULT_KOSHER_STICKER.to_string()),
            match_mode,
            log_file: get("CROSSIE_LOG_FILE").map(PathBuf::from),
            log_format,
            recovery,
        })
    }
}
