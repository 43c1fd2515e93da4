//! Reading, writing, and enumerating notes on disk.
//!
//! Only [`VaultError::InvalidPath`] is ever returned as an error. Missing
//! notes and I/O failures during mutation are reported through the outcome
//! types so a single bad file never takes down a call.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};
use walkdir::WalkDir;

use obvault_core::error::VaultError;
use obvault_core::note::{DeleteOutcome, NoteRecord, ReadOutcome, WriteOutcome};

use crate::path::{has_note_extension, PathResolver};

/// File-backed note storage rooted at a vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    resolver: PathResolver,
}

impl VaultStore {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    /// List every note under `folder` (or the whole vault), sorted by path.
    ///
    /// A folder that does not exist yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `folder` escapes the root.
    pub fn list(&self, folder: Option<&str>) -> Result<Vec<NoteRecord>, VaultError> {
        let dir = match folder {
            Some(folder) => self.resolver.resolve(folder, false)?,
            None => self.root().to_path_buf(),
        };
        if !dir.is_dir() {
            debug!(dir = %dir.display(), "list target is not a directory");
            return Ok(Vec::new());
        }

        let mut notes: Vec<NoteRecord> = self
            .note_paths(&dir)
            .iter()
            .filter_map(|path| self.record(path))
            .collect();
        notes.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(notes)
    }

    /// All `.md` files beneath `dir`, recursively, sorted by path.
    ///
    /// Entries that cannot be visited are logged and skipped.
    pub fn note_paths(&self, dir: &Path) -> Vec<PathBuf> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "skipping unreadable vault entry");
                    continue;
                }
            };
            if entry.file_type().is_file() && has_note_extension(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        paths
    }

    fn record(&self, path: &Path) -> Option<NoteRecord> {
        let modified = match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cannot stat note, skipping");
                return None;
            }
        };
        Some(NoteRecord {
            name: note_name(path),
            path: self.resolver.relative(path),
            full_path: path.display().to_string(),
            modified: DateTime::<Utc>::from(modified),
        })
    }

    /// Read a note's content.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `identifier` escapes the root.
    pub fn read(&self, identifier: &str) -> Result<ReadOutcome, VaultError> {
        let path = self.resolver.resolve(identifier, false)?;
        if !self.resolver.is_note(&path) {
            return Ok(ReadOutcome::NotFound);
        }
        match fs::read_to_string(&path) {
            Ok(content) => Ok(ReadOutcome::Found(content)),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read note");
                Ok(ReadOutcome::NotFound)
            }
        }
    }

    /// Create or overwrite a note, creating parent folders as needed.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `identifier` escapes the root
    /// or is empty.
    pub fn write(&self, identifier: &str, content: &str) -> Result<WriteOutcome, VaultError> {
        let path = self.resolver.resolve(identifier, true)?;

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!(path = %path.display(), error = %e, "failed to create note folder");
                return Ok(WriteOutcome::Failed(e.to_string()));
            }
        }

        match fs::write(&path, content) {
            Ok(()) => {
                debug!(path = %path.display(), bytes = content.len(), "note written");
                Ok(WriteOutcome::Written)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to write note");
                Ok(WriteOutcome::Failed(e.to_string()))
            }
        }
    }

    /// Delete a note if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if `identifier` escapes the root.
    pub fn delete(&self, identifier: &str) -> Result<DeleteOutcome, VaultError> {
        let path = self.resolver.resolve(identifier, false)?;
        if !self.resolver.is_note(&path) {
            return Ok(DeleteOutcome::NotFound);
        }
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = %path.display(), "note deleted");
                Ok(DeleteOutcome::Deleted)
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to delete note");
                Ok(DeleteOutcome::Failed(e.to_string()))
            }
        }
    }
}

/// File stem of a note path.
pub fn note_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
