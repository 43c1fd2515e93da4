//! Error types for obvault.
//!
//! Only conditions that must fail a call are errors. A missing note, a
//! failed write, or malformed frontmatter are ordinary outcomes and live in
//! [`crate::note`] and [`crate::frontmatter`].

use thiserror::Error;

/// Top-level result type for obvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Top-level error type for obvault.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("vault is read-only: {0} is disabled")]
    ReadOnly(&'static str),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl VaultError {
    pub fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPath {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for VaultError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
