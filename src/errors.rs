//! # Error Types Module
//!
//! This module defines the error type shared by the clue log, the spreadsheet
//! layer and configuration loading.

/// Errors raised while recording clues
#[derive(Debug, Clone, PartialEq)]
pub enum CrossieError {
    /// Missing or invalid configuration value
    Config(String),
    /// Service-account key could not be read or parsed
    Credentials(String),
    /// Token exchange rejected by the identity provider
    Auth(String),
    /// Remote service answered with a non-success status
    Http { status: u16, message: String },
    /// Request never got a response (DNS, TLS, timeout, ...)
    Transport(String),
    /// Spreadsheet-level problem (unknown document, bad payload)
    Sheet(String),
    /// Local file errors
    Io(String),
    /// Command received without the text it needs
    MalformedCommand(String),
    /// Circuit breaker is open, remote calls are short-circuited
    CircuitOpen,
}

impl CrossieError {
    /// Whether a failed remote call is worth another attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            CrossieError::Transport(_) => true,
            CrossieError::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

impl std::fmt::Display for CrossieError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CrossieError::Config(msg) => write!(f, "Configuration error: {msg}"),
            CrossieError::Credentials(msg) => write!(f, "Credentials error: {msg}"),
            CrossieError::Auth(msg) => write!(f, "Authentication error: {msg}"),
            CrossieError::Http { status, message } => {
                write!(f, "HTTP error {status}: {message}")
            }
            CrossieError::Transport(msg) => write!(f, "Transport error: {msg}"),
            CrossieError::Sheet(msg) => write!(f, "Spreadsheet error: {msg}"),
            CrossieError::Io(msg) => write!(f, "I/O error: {msg}"),
            CrossieError::MalformedCommand(msg) => write!(f, "Malformed command: {msg}"),
            CrossieError::CircuitOpen => write!(f, "Spreadsheet circuit breaker is open"),
        }
    }
}

impl std::error::Error for CrossieError {}

impl From<std::io::Error> for CrossieError {
    fn from(err: std::io::Error) -> Self {
        CrossieError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for CrossieError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => CrossieError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => CrossieError::Sheet(err.to_string()),
            None => CrossieError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for CrossieError {
    fn from(err: serde_json::Error) -> Self {
        CrossieError::Credentials(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for CrossieError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        CrossieError::Credentials(err.to_string())
    }
}
