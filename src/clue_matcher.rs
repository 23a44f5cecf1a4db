//! # Clue Matcher Module
//!
//! This module finds crossword clues in chat messages. A clue is recognised by
//! its trailing enumeration, e.g. `Capital of France (5)` or `Pie in the sky (5,3)`.
//!
//! Matching is a leftmost-first scan: after each match the search resumes at the
//! match's end, so clues come back in message order and never overlap.

use regex::Regex;
use tracing::{debug, trace};

use crate::clue_patterns::{EMOJI_REGEX, LEGACY_REGEX, SCAN_REGEX};
use crate::config::MatchMode;
use crate::errors::CrossieError;

/// Clue detector over one of the clue patterns
#[derive(Debug, Clone)]
pub struct ClueMatcher {
    pattern: Regex,
    mode: MatchMode,
}

impl ClueMatcher {
    /// Create a matcher for the given scan mode
    ///
    /// # Examples
    ///
    /// ```rust
    /// use crossiebot::clue_matcher::ClueMatcher;
    /// use crossiebot::config::MatchMode;
    ///
    /// let matcher = ClueMatcher::new(MatchMode::Scan);
    /// assert_eq!(matcher.find_clues("Capital of France (5)"), vec!["Capital of France (5)"]);
    /// ```
    pub fn new(mode: MatchMode) -> Self {
        let pattern = match mode {
            MatchMode::Scan => SCAN_REGEX.clone(),
            MatchMode::Legacy => LEGACY_REGEX.clone(),
        };
        Self { pattern, mode }
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether the message contains at least one clue
    pub fn has_clues(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    /// All clues in the message, left to right
    ///
    /// Text between the end of one match and the start of the next is dropped.
    pub fn find_clues(&self, text: &str) -> Vec<String> {
        let mut clues = Vec::new();
        let mut rest = text;

        while let Some(found) = self.pattern.find(rest) {
            trace!(start = found.start(), end = found.end(), "Clue match");
            clues.push(found.as_str().to_string());
            rest = &rest[found.end()..];
        }

        debug!(clue_count = clues.len(), mode = ?self.mode, "Clue scan completed");
        clues
    }
}

impl Default for ClueMatcher {
    fn default() -> Self {
        Self::new(MatchMode::default())
    }
}

/// Whether the message contains the grin or smile emoji
pub fn has_grin(text: &str) -> bool {
    EMOJI_REGEX.is_match(text)
}

/// Free-form clue text following `/splclue`
///
/// Leading whitespace and newlines are stripped; a blank remainder is rejected.
pub fn extract_special_clue(args: &str) -> Result<String, CrossieError> {
    let clue = args.trim_start();
    if clue.trim_end().is_empty() {
        return Err(CrossieError::MalformedCommand(
            "/splclue needs the clue text after the command".to_string(),
        ));
    }
    Ok(clue.to_string())
}
