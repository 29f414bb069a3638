//! # Sketch Blobs
//!
//! Object storage for drawing document content.
//!
//! Document bytes live in a flat object namespace keyed by node id (with a
//! fixed suffix for the document type), never by path, so renames in the
//! metadata tree never move objects. Folders are represented
//! directly in the blob namespace as directory markers so the object store
//! mirrors the visible hierarchy.
//!
//! The [`BlobStore`] trait is the narrow seam the coordinator writes
//! through; [`FsBlobStore`] is the filesystem-backed implementation.
//!
//! ## Example Usage
//!
//! ```no_run
//! use sketch_blobs::{BlobStore, FsBlobStore};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FsBlobStore::new(Path::new("sketch_data/blobs"))?;
//! store.put("0197a1b2c3d4e5f60718293a4b5c6d7e.json", b"{}", "application/json")?;
//! # Ok(())
//! # }
//! ```

mod fs;

pub use fs::FsBlobStore;

/// Errors that can occur during blob operations.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Root directory is unusable (cannot be created or canonicalised)
    #[error("invalid blob root directory: {0}")]
    InvalidRootDirectory(String),

    /// Key or folder path failed validation
    #[error("invalid blob key: {0}")]
    InvalidKey(String),

    /// No object stored under the given key
    #[error("blob not found: {0}")]
    NotFound(String),

    /// I/O error occurred
    #[error("blob I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for blob operations.
pub type BlobResult<T> = Result<T, BlobError>;

/// Storage backend seam for document content.
///
/// Implementations must be shareable across workers. All operations are
/// synchronous and may block the calling worker.
pub trait BlobStore: Send + Sync + std::fmt::Debug {
    /// Stores `bytes` under `key`, overwriting any existing object.
    ///
    /// Returns a locator for the stored object.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> BlobResult<String>;

    /// Fetches the raw bytes stored under `key`.
    fn get(&self, key: &str) -> BlobResult<Vec<u8>>;

    /// Removes the object stored under `key`.
    fn delete(&self, key: &str) -> BlobResult<()>;

    /// Lists object keys (and folder markers, with a trailing `/`) starting
    /// with `prefix`. An empty prefix lists everything.
    fn list(&self, prefix: &str) -> BlobResult<Vec<String>>;

    /// Ensures a directory marker exists for `folder_path` (a `/`-separated
    /// absolute path from the metadata tree).
    fn create_folder(&self, folder_path: &str) -> BlobResult<()>;
}
