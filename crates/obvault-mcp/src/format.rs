//! Text rendering of vault outcomes for gateways that speak plain strings.
//!
//! Both the MCP tools and the CLI print exactly these strings.

use serde::Serialize;

use obvault_core::error::VaultError;
use obvault_core::frontmatter::Frontmatter;
use obvault_core::note::{DeleteOutcome, ReadOutcome, WriteOutcome};

pub fn not_found(path: &str) -> String {
    format!("Note not found: {path}")
}

pub fn read(path: &str, outcome: ReadOutcome) -> String {
    match outcome {
        ReadOutcome::Found(content) => content,
        ReadOutcome::NotFound => not_found(path),
    }
}

pub fn write(path: &str, outcome: &WriteOutcome) -> String {
    match outcome {
        WriteOutcome::Written => format!("Note saved successfully: {path}"),
        WriteOutcome::Failed(_) => format!("Failed to save note: {path}"),
    }
}

pub fn delete(path: &str, outcome: &DeleteOutcome) -> String {
    match outcome {
        DeleteOutcome::Deleted => format!("Note deleted successfully: {path}"),
        DeleteOutcome::NotFound | DeleteOutcome::Failed(_) => {
            format!("Failed to delete note or note not found: {path}")
        }
    }
}

/// Pretty-printed JSON, as returned by the list and search tools.
///
/// # Errors
///
/// Returns [`VaultError::Serialization`] if `value` cannot be encoded.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String, VaultError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// # Errors
///
/// Returns [`VaultError::Serialization`] if the frontmatter cannot be encoded.
pub fn metadata(path: &str, metadata: Option<&Frontmatter>) -> Result<String, VaultError> {
    match metadata {
        Some(fm) => json(fm),
        None => Ok(not_found(path)),
    }
}
