//! Snapshot cache for the file tree.
//!
//! The original requirement is fast repeated listing without re-querying the
//! metadata store on every read. This is an explicit cache component with a
//! defined invalidation contract rather than an implicit module-level
//! variable:
//!
//! - every mutating coordinator operation calls [`TreeCache::invalidate`]
//!   before it returns;
//! - the next read reloads from the store and pins the fresh snapshot;
//! - a read concurrent with a mutation may still serve the snapshot taken
//!   before that mutation completed, but never one older than the last
//!   *completed* mutation.

use crate::CoreResult;
use sketch_types::FileMetadata;
use std::sync::{Arc, Mutex};

/// Cached snapshot of all live metadata records.
#[derive(Debug, Default)]
pub struct TreeCache {
    snapshot: Mutex<Option<Arc<Vec<FileMetadata>>>>,
}

impl TreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached snapshot, reloading through `reload` when the
    /// cache is cold or has been invalidated.
    pub fn get_or_reload<F>(&self, reload: F) -> CoreResult<Arc<Vec<FileMetadata>>>
    where
        F: FnOnce() -> CoreResult<Vec<FileMetadata>>,
    {
        let mut guard = self.snapshot.lock().expect("tree cache lock poisoned");
        if let Some(snapshot) = guard.as_ref() {
            return Ok(snapshot.clone());
        }
        let fresh = Arc::new(reload()?);
        *guard = Some(fresh.clone());
        Ok(fresh)
    }

    /// Drops the cached snapshot. Called after every completed mutation.
    pub fn invalidate(&self) {
        let mut guard = self.snapshot.lock().expect("tree cache lock poisoned");
        *guard = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn reload_runs_once_until_invalidated() {
        let cache = TreeCache::new();
        let loads = AtomicUsize::new(0);
        let load = || {
            loads.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        };

        cache.get_or_reload(load).unwrap();
        cache.get_or_reload(load).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        cache.invalidate();
        cache.get_or_reload(load).unwrap();
        assert_eq!(loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn failed_reload_leaves_cache_cold() {
        let cache = TreeCache::new();
        let result = cache.get_or_reload(|| Err(crate::CoreError::Internal("boom".into())));
        assert!(result.is_err());

        // next read retries the load
        let loaded = cache.get_or_reload(|| Ok(Vec::new())).unwrap();
        assert!(loaded.is_empty());
    }
}
