//! # obvault-vault
//!
//! File system operations, search, and the service facade for an obvault
//! vault.
//!
//! The vault directory is the only source of truth. Every call recomputes
//! what it needs from disk; nothing is cached or indexed between calls.

pub mod config;
pub mod path;
pub mod search;
pub mod service;
pub mod store;

pub use config::VaultConfig;
pub use path::PathResolver;
pub use search::SearchEngine;
pub use service::VaultService;
pub use store::VaultStore;
