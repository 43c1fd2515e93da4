//! # obvault-core
//!
//! Core types for the obvault note vault.
//!
//! This crate defines the foundational types used across all other obvault crates:
//! - [`NoteRecord`], [`SearchMatch`], [`SearchResult`]: derived, per-call views of notes
//! - Outcomes ([`ReadOutcome`], [`WriteOutcome`], [`DeleteOutcome`])
//! - Error type ([`VaultError`])
//! - Frontmatter extraction ([`frontmatter`])

pub mod error;
pub mod frontmatter;
pub mod note;

pub use error::{Result, VaultError};
pub use frontmatter::Frontmatter;
pub use note::{DeleteOutcome, NoteRecord, ReadOutcome, SearchMatch, SearchResult, WriteOutcome};
