//! Brute-force full-text search over every note in the vault.
//!
//! Each call walks the vault and reads every note; there is no index. Vaults
//! are personal knowledge bases, so a linear scan stays fast enough.

use std::fs;

use tracing::{debug, warn};

use obvault_core::note::{SearchMatch, SearchResult, MAX_MATCHES_PER_NOTE};

use crate::store::{note_name, VaultStore};

/// Case-insensitive substring search across a [`VaultStore`].
pub struct SearchEngine<'a> {
    store: &'a VaultStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a VaultStore) -> Self {
        Self { store }
    }

    /// Search every note for `query`, in path order.
    ///
    /// Notes that cannot be read as UTF-8 are logged and left out.
    pub fn search(&self, query: &str) -> Vec<SearchResult> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        for path in self.store.note_paths(self.store.root()) {
            let content = match fs::read_to_string(&path) {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "error searching note, skipping");
                    continue;
                }
            };
            if let Some(matches) = find_matches(&content, &needle) {
                results.push(SearchResult {
                    name: note_name(&path),
                    path: self.store.resolver().relative(&path),
                    matches,
                });
            }
        }

        debug!(query, hits = results.len(), "search complete");
        results
    }
}

/// Matching lines of `content` for an already-lowercased `needle`.
///
/// Returns `None` when the note does not contain the needle at all.
pub fn find_matches(content: &str, needle: &str) -> Option<Vec<SearchMatch>> {
    if !content.to_lowercase().contains(needle) {
        return None;
    }

    let matches = content
        .lines()
        .enumerate()
        .filter(|(_, line)| line.to_lowercase().contains(needle))
        .take(MAX_MATCHES_PER_NOTE)
        .map(|(i, line)| SearchMatch::new(i + 1, line))
        .collect();
    Some(matches)
}
