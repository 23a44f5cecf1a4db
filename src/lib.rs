//! # Crossie Bot
//!
//! A Telegram bot that spots crossword clues in one group chat and records
//! them in a local clue file and a Google spreadsheet.

pub mod bot;
pub mod circuit_breaker;
pub mod clue_log;
pub mod clue_matcher;
pub mod clue_model;
pub mod clue_patterns;
pub mod config;
pub mod errors;
pub mod localization;
pub mod recorder;
pub mod retry;
pub mod sheets;
