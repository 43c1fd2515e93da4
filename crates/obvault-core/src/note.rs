//! Note records and per-operation outcomes.
//!
//! Everything here is derived from the file system at call time and never
//! persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of matching lines reported per note.
pub const MAX_MATCHES_PER_NOTE: usize = 5;

/// Maximum snippet length, in characters.
pub const SNIPPET_CHARS: usize = 100;

/// A note as it appears in list results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    /// File stem (`daily/2025-01-01.md` → `2025-01-01`).
    pub name: String,
    /// Path relative to the vault root, `/` separated.
    pub path: String,
    /// Absolute path on disk.
    pub full_path: String,
    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// One matching line inside a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMatch {
    /// 1-based line number.
    pub line_number: usize,
    /// The trimmed line, cut to [`SNIPPET_CHARS`] characters.
    pub content: String,
}

impl SearchMatch {
    pub fn new(line_number: usize, line: &str) -> Self {
        Self {
            line_number,
            content: snippet(line),
        }
    }
}

/// All matches for a single note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub name: String,
    pub path: String,
    pub matches: Vec<SearchMatch>,
}

/// Result of reading a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Found(String),
    NotFound,
}

impl ReadOutcome {
    pub fn into_content(self) -> Option<String> {
        match self {
            Self::Found(content) => Some(content),
            Self::NotFound => None,
        }
    }
}

/// Result of writing a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The write hit an I/O error; the reason has already been logged.
    Failed(String),
}

impl WriteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Written)
    }
}

/// Result of deleting a note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    /// The removal hit an I/O error; the reason has already been logged.
    Failed(String),
}

impl DeleteOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Trim a line and keep at most [`SNIPPET_CHARS`] characters.
pub fn snippet(line: &str) -> String {
    line.trim().chars().take(SNIPPET_CHARS).collect()
}
