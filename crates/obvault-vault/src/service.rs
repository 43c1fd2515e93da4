//! The vault facade that gateways call.

use std::fs;

use tracing::{debug, info};

use obvault_core::error::VaultError;
use obvault_core::frontmatter::{self, Frontmatter};
use obvault_core::note::{DeleteOutcome, NoteRecord, ReadOutcome, SearchResult, WriteOutcome};

use crate::config::VaultConfig;
use crate::path::PathResolver;
use crate::search::SearchEngine;
use crate::store::VaultStore;

/// All note operations over a single vault.
#[derive(Debug, Clone)]
pub struct VaultService {
    config: VaultConfig,
    store: VaultStore,
}

impl VaultService {
    /// Open the vault described by `config`, creating its root if needed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Io`] if the root cannot be created or made absolute.
    pub fn open(config: VaultConfig) -> Result<Self, VaultError> {
        if !config.root.exists() {
            info!(root = %config.root.display(), "creating vault root");
            fs::create_dir_all(&config.root)?;
        }
        let root = std::path::absolute(&config.root)?;
        let config = VaultConfig { root, ..config };
        let store = VaultStore::new(PathResolver::new(config.root.clone()));
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &VaultConfig {
        &self.config
    }

    pub fn readonly(&self) -> bool {
        self.config.readonly
    }

    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `folder` escapes the root.
    pub fn list_notes(&self, folder: Option<&str>) -> Result<Vec<NoteRecord>, VaultError> {
        debug!(folder, "list_notes");
        self.store.list(folder)
    }

    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `path` escapes the root.
    pub fn read_note(&self, path: &str) -> Result<ReadOutcome, VaultError> {
        debug!(path, "read_note");
        self.store.read(path)
    }

    /// # Errors
    ///
    /// Returns [`VaultError::ReadOnly`] in readonly mode and
    /// [`VaultError::InvalidPath`] if `path` escapes the root.
    pub fn write_note(&self, path: &str, content: &str) -> Result<WriteOutcome, VaultError> {
        debug!(path, "write_note");
        if self.config.readonly {
            return Err(VaultError::ReadOnly("write_note"));
        }
        self.store.write(path, content)
    }

    /// # Errors
    ///
    /// Returns [`VaultError::ReadOnly`] in readonly mode and
    /// [`VaultError::InvalidPath`] if `path` escapes the root.
    pub fn delete_note(&self, path: &str) -> Result<DeleteOutcome, VaultError> {
        debug!(path, "delete_note");
        if self.config.readonly {
            return Err(VaultError::ReadOnly("delete_note"));
        }
        self.store.delete(path)
    }

    pub fn search_notes(&self, query: &str) -> Vec<SearchResult> {
        debug!(query, "search_notes");
        SearchEngine::new(&self.store).search(query)
    }

    /// Frontmatter of a note, or `None` if the note does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `path` escapes the root.
    pub fn get_metadata(&self, path: &str) -> Result<Option<Frontmatter>, VaultError> {
        debug!(path, "get_metadata");
        let metadata = self
            .store
            .read(path)?
            .into_content()
            .map(|content| frontmatter::extract(&content));
        Ok(metadata)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn open(readonly: bool) -> (TempDir, VaultService) {
        let dir = TempDir::new().unwrap();
        let service = VaultService::open(VaultConfig::new(dir.path(), readonly)).unwrap();
        (dir, service)
    }

    #[test]
    fn open_creates_missing_root() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("nested").join("vault");
        let service = VaultService::open(VaultConfig::new(&root, false)).unwrap();
        assert!(root.is_dir());
        assert!(service.config().root.is_absolute());
    }

    #[test]
    fn open_fails_when_root_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("occupied");
        fs::write(&file, "x").unwrap();
        let result = VaultService::open(VaultConfig::new(file.join("vault"), false));
        assert!(matches!(result, Err(VaultError::Io(_))));
    }

    #[test]
    fn metadata_of_note_with_frontmatter() {
        let (_dir, service) = open(false);
        service
            .write_note("foo.md", "---\ntitle: Foo\n---\nbody")
            .unwrap();
        let fm = service.get_metadata("foo.md").unwrap().unwrap();
        assert_eq!(serde_json::to_value(&fm).unwrap(), json!({"title": "Foo"}));
    }

    #[test]
    fn metadata_without_frontmatter_is_empty_mapping() {
        let (_dir, service) = open(false);
        service.write_note("plain.md", "just body").unwrap();
        let fm = service.get_metadata("plain.md").unwrap().unwrap();
        assert!(fm.is_empty());
    }

    #[test]
    fn metadata_of_empty_note_is_empty_mapping() {
        let (_dir, service) = open(false);
        service.write_note("empty.md", "").unwrap();
        assert_eq!(
            service.get_metadata("empty.md").unwrap(),
            Some(Frontmatter::empty())
        );
    }

    #[test]
    fn metadata_of_missing_note_is_none() {
        let (_dir, service) = open(false);
        assert_eq!(service.get_metadata("missing.md").unwrap(), None);
    }

    #[test]
    fn metadata_falls_back_to_raw_lines() {
        let (_dir, service) = open(false);
        service
            .write_note("bad.md", "---\n: : :\n[oops\n---\n")
            .unwrap();
        let fm = service.get_metadata("bad.md").unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(&fm).unwrap(),
            json!({"raw": [": : :", "[oops"]})
        );
    }

    #[test]
    fn readonly_service_refuses_mutation() {
        let (dir, service) = open(true);
        assert!(matches!(
            service.write_note("x.md", "x"),
            Err(VaultError::ReadOnly(_))
        ));
        fs::write(dir.path().join("keep.md"), "x").unwrap();
        assert!(matches!(
            service.delete_note("keep.md"),
            Err(VaultError::ReadOnly(_))
        ));
        assert!(dir.path().join("keep.md").exists());
        assert!(matches!(
            service.read_note("keep.md").unwrap(),
            ReadOutcome::Found(_)
        ));
    }

    #[test]
    fn search_and_list_go_through_the_facade() {
        let (_dir, service) = open(false);
        service.write_note("a", "hello world").unwrap();
        service.write_note("b", "goodbye").unwrap();

        assert_eq!(service.list_notes(None).unwrap().len(), 2);
        let results = service.search_notes("Hello");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matches[0].line_number, 1);
        assert_eq!(results[0].matches[0].content, "hello world");
    }
}
