//! Filesystem-backed blob store implementation.
//!
//! # Storage Layout
//!
//! ```text
//! <root>/                  # validated and canonicalised at construction
//! ├── <id>.json            # document objects, flat, keyed by node id
//! └── Docs/                # directory markers mirroring the metadata tree
//!     └── Sprints/
//! ```
//!
//! Object writes are staged: bytes land in a temporary sibling first and are
//! renamed into place, so readers never observe a half-written document.

use crate::{BlobError, BlobResult, BlobStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Blob store over a local directory.
///
/// # Design
///
/// - Keys are flat: no path separators, no traversal components
/// - Objects are immutable bytes under their key; `put` replaces atomically
/// - Folder markers are ordinary directories, created idempotently
#[derive(Debug)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    /// Creates a blob store rooted at `root`.
    ///
    /// The directory is created when missing (the object-store analogue of
    /// creating a bucket on first connect) and canonicalised so later joins
    /// cannot escape it.
    ///
    /// # Errors
    ///
    /// Returns `BlobError::InvalidRootDirectory` if the directory cannot be
    /// created, is not a directory, or cannot be canonicalised.
    pub fn new(root: &Path) -> BlobResult<Self> {
        if !root.exists() {
            fs::create_dir_all(root).map_err(|e| {
                BlobError::InvalidRootDirectory(format!(
                    "cannot create {}: {}",
                    root.display(),
                    e
                ))
            })?;
        }

        if !root.is_dir() {
            return Err(BlobError::InvalidRootDirectory(format!(
                "path is not a directory: {}",
                root.display()
            )));
        }

        let root = root.canonicalize().map_err(|e| {
            BlobError::InvalidRootDirectory(format!(
                "cannot canonicalize {}: {}",
                root.display(),
                e
            ))
        })?;

        Ok(Self { root })
    }

    /// Validates an object key: non-empty, flat, no traversal.
    fn validate_key(key: &str) -> BlobResult<()> {
        if key.is_empty() {
            return Err(BlobError::InvalidKey("key cannot be empty".into()));
        }
        if key.contains('/') || key.contains('\\') || key == "." || key == ".." {
            return Err(BlobError::InvalidKey(format!(
                "key must be a flat name: {key}"
            )));
        }
        Ok(())
    }

    fn object_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }

    /// Maps a `/`-separated tree path onto a directory under the root.
    fn folder_dir(&self, folder_path: &str) -> BlobResult<PathBuf> {
        let trimmed = folder_path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(BlobError::InvalidKey("folder path cannot be empty".into()));
        }

        let mut dir = self.root.clone();
        for segment in trimmed.split('/') {
            if segment.is_empty() || segment == "." || segment == ".." {
                return Err(BlobError::InvalidKey(format!(
                    "folder path contains an invalid segment: {folder_path}"
                )));
            }
            dir.push(segment);
        }
        Ok(dir)
    }

    fn collect_keys(dir: &Path, rel: &str, out: &mut Vec<String>) -> BlobResult<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(_) => continue,
            };
            let child_rel = if rel.is_empty() {
                name.clone()
            } else {
                format!("{rel}/{name}")
            };

            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                out.push(format!("{child_rel}/"));
                Self::collect_keys(&entry.path(), &child_rel, out)?;
            } else if file_type.is_file() {
                // skip staged writes that never got renamed into place
                if !name.ends_with(".tmp") {
                    out.push(child_rel);
                }
            }
        }
        Ok(())
    }
}

impl BlobStore for FsBlobStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> BlobResult<String> {
        Self::validate_key(key)?;

        let target = self.object_path(key);
        if target.is_dir() {
            return Err(BlobError::InvalidKey(format!(
                "key collides with a folder marker: {key}"
            )));
        }

        // stage then rename so a crashed write never leaves a torn object
        let staged = self.root.join(format!(".{key}.tmp"));
        fs::write(&staged, bytes)?;
        fs::rename(&staged, &target)?;

        tracing::debug!(key, size = bytes.len(), content_type, "stored blob");
        Ok(format!("file://{}", target.display()))
    }

    fn get(&self, key: &str) -> BlobResult<Vec<u8>> {
        Self::validate_key(key)?;

        let target = self.object_path(key);
        if !target.is_file() {
            return Err(BlobError::NotFound(key.to_owned()));
        }
        Ok(fs::read(&target)?)
    }

    fn delete(&self, key: &str) -> BlobResult<()> {
        Self::validate_key(key)?;

        let target = self.object_path(key);
        if !target.is_file() {
            return Err(BlobError::NotFound(key.to_owned()));
        }
        fs::remove_file(&target)?;
        tracing::debug!(key, "deleted blob");
        Ok(())
    }

    fn list(&self, prefix: &str) -> BlobResult<Vec<String>> {
        let mut keys = Vec::new();
        Self::collect_keys(&self.root, "", &mut keys)?;
        keys.retain(|k| k.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }

    fn create_folder(&self, folder_path: &str) -> BlobResult<()> {
        let dir = self.folder_dir(folder_path)?;
        fs::create_dir_all(&dir)?;
        tracing::debug!(folder = folder_path, "created folder marker");
        Ok(())
    }
}
