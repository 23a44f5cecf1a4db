//! # Clue Patterns Module
//!
//! This module contains the regex patterns used to spot crossword clues and the
//! emoji that trigger the grin reply.

use lazy_static::lazy_static;
use regex::Regex;

// A clue is some text followed by a crossword enumeration: "(5)", "(5,3)", "(4-4)", "(2 3)".
// The enumeration starts with 1-9 and may continue with separated digit groups.
macro_rules! enumeration {
    () => {
        r"\([1-9](?:\s*[,|\-]*\s*[0-9]+)*\)"
    };
}

// Leading text skips whitespace and list separators, then stops at the first enumeration.
pub const SCAN_PATTERN: &str = concat!(r"[^\s,;.:].*?\s*", enumeration!());

// Leading text swallows everything up to the last enumeration on the line.
pub const LEGACY_PATTERN: &str = concat!(r".+\s*", enumeration!());

// :smile: and :grin:
pub const EMOJI_PATTERN: &str = r"\x{1F604}|\x{1F601}";

lazy_static! {
    pub static ref SCAN_REGEX: Regex =
        Regex::new(SCAN_PATTERN).expect("Scan clue pattern should be valid");
    pub static ref LEGACY_REGEX: Regex =
        Regex::new(LEGACY_PATTERN).expect("Legacy clue pattern should be valid");
    pub static ref EMOJI_REGEX: Regex =
        Regex::new(EMOJI_PATTERN).expect("Emoji pattern should be valid");
}
