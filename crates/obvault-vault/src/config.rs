//! Startup configuration for a vault.

use std::path::{Path, PathBuf};

/// Immutable process-wide settings, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// Vault root directory. Created on open if absent.
    pub root: PathBuf,
    /// When set, write and delete are neither advertised nor allowed.
    pub readonly: bool,
}

impl VaultConfig {
    pub fn new(root: impl Into<PathBuf>, readonly: bool) -> Self {
        Self {
            root: root.into(),
            readonly,
        }
    }

    /// The fallback vault location under a home directory: `~/Documents/Obsidian`.
    pub fn default_root(home: &Path) -> PathBuf {
        home.join("Documents").join("Obsidian")
    }

    pub fn mode(&self) -> &'static str {
        if self.readonly {
            "readonly"
        } else {
            "read-write"
        }
    }
}
