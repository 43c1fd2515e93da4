//! Mapping note identifiers onto files beneath the vault root.

use std::path::{Component, Path, PathBuf};

use obvault_core::error::VaultError;

/// File extension every note carries.
pub const NOTE_EXTENSION: &str = "md";

/// Resolves caller-supplied identifiers to absolute paths inside the vault.
///
/// Resolution is lexical first: `.` is dropped and `..` pops a component,
/// so an identifier can never name anything above the root regardless of
/// whether the target exists yet. The deepest existing part of the result is
/// then canonicalized, so a symlink inside the vault cannot lead outside it.
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `identifier` to an absolute path beneath the root.
    ///
    /// With `for_write`, an identifier without an extension gets `.md`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidPath`] if the identifier is absolute,
    /// climbs above the root, passes through a symlink pointing outside the
    /// root, or (for writes) names the root itself.
    pub fn resolve(&self, identifier: &str, for_write: bool) -> Result<PathBuf, VaultError> {
        let mut relative = normalize(identifier)?;

        if for_write {
            if relative.as_os_str().is_empty() {
                return Err(VaultError::invalid_path(identifier, "note path is empty"));
            }
            if relative.extension().is_none() {
                relative.set_extension(NOTE_EXTENSION);
            }
        }

        let path = self.root.join(relative);
        self.check_links(identifier, &path)?;
        Ok(path)
    }

    fn check_links(&self, identifier: &str, path: &Path) -> Result<(), VaultError> {
        // A root that does not exist yet has no links to follow.
        let Ok(root) = self.root.canonicalize() else {
            return Ok(());
        };
        let Some(existing) = path
            .ancestors()
            .find(|p| p.symlink_metadata().is_ok())
        else {
            return Ok(());
        };
        match existing.canonicalize() {
            Ok(real) if real.starts_with(&root) => Ok(()),
            Ok(_) => Err(VaultError::invalid_path(
                identifier,
                "symlink leads outside the vault root",
            )),
            Err(e) => Err(VaultError::invalid_path(
                identifier,
                format!("cannot resolve path: {e}"),
            )),
        }
    }

    /// Whether `path` is an existing note file (regular file ending in `.md`).
    pub fn is_note(&self, path: &Path) -> bool {
        has_note_extension(path) && path.is_file()
    }

    /// `/`-separated path of `path` relative to the root.
    pub fn relative(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        rel.components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

pub fn has_note_extension(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(NOTE_EXTENSION)
}

fn normalize(identifier: &str) -> Result<PathBuf, VaultError> {
    let mut out = PathBuf::new();
    for component in Path::new(identifier).components() {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return Err(VaultError::invalid_path(
                        identifier,
                        "path escapes the vault root",
                    ));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(VaultError::invalid_path(
                    identifier,
                    "absolute paths are not allowed",
                ));
            }
        }
    }
    Ok(out)
}
