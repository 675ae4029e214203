//! Lexical read/write query classification.
//!
//! The classifier is a heuristic gate, not a Cypher parser: it scans
//! the raw query text for whole-word mutation keywords, case
//! insensitively. A keyword inside a string literal or comment still
//! counts as a mutation marker. That false-positive exposure is part
//! of the contract; do not replace this with a real parser, the
//! observable classification of such inputs would change.

use regex::Regex;
use std::sync::LazyLock;

/// Whole-word mutation keywords. `\b` gives the word-boundary match;
/// `(?i)` the case insensitivity.
static WRITE_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(MERGE|CREATE|SET|DELETE|REMOVE|ADD)\b").expect("keyword pattern is valid")
});

/// Lexically derived intent of a query.
///
/// Derived solely from the query text; never validated against what
/// the query actually does when executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryIntent {
    /// No mutation keyword found.
    Read,
    /// At least one mutation keyword found.
    Write,
}

impl QueryIntent {
    /// Returns `true` for [`QueryIntent::Write`].
    pub fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }
}

/// Classify a query string as a read or a write.
///
/// Pure and total: any input string classifies, no failure mode.
pub fn classify(query: &str) -> QueryIntent {
    if WRITE_KEYWORDS.is_match(query) {
        QueryIntent::Write
    } else {
        QueryIntent::Read
    }
}

// ============================================================================
// Tests
// ============================================================================
