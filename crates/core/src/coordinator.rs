//! Cross-store orchestration of file-tree operations.
//!
//! The [`FileCoordinator`] is the only component allowed to mutate both the
//! metadata store and the blob store. After any single public operation
//! completes successfully, the two stores are mutually consistent for the
//! affected node and, for rename/delete, for its entire descendant
//! subtree.
//!
//! ## Write ordering
//!
//! The metadata store is authoritative; blobs are the recoverable side.
//! Writes therefore always hit metadata first and the blob second. The
//! inconsistency windows this leaves open (metadata row without blob after
//! a crash between the two writes, stale blob after a failed upload) are
//! deliberate: there is no cross-store transaction and no automatic
//! compensation. Failures surface wrapped with operation and id context;
//! recovery is a corrective retry.
//!
//! ## Locking
//!
//! One coarse mutex serializes all mutating operations (create, save,
//! rename, delete) across all nodes. Reads go through the snapshot cache
//! and may run concurrently with writers; the cache contract in
//! [`crate::cache`] bounds what they can observe.

use crate::cache::TreeCache;
use crate::constants::{
    BLOB_CONTENT_TYPE, BLOB_KEY_SUFFIX, MAX_TREE_DEPTH, SEED_DOCUMENT_ID,
};
use crate::tree::{self, canonicalize_document_name, child_path};
use crate::{CoreError, CoreResult};
use chrono::Utc;
use sketch_blobs::{BlobError, BlobStore};
use sketch_store::MetadataStore;
use sketch_types::{FileItem, FileMetadata};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Forms the blob key for a node id. Keys never change on rename; blobs
/// are keyed by id, not by path.
pub fn blob_key(id: &str) -> String {
    format!("{id}{BLOB_KEY_SUFFIX}")
}

/// Orchestrates create/save/rename/delete across the metadata store and the
/// blob store, maintaining tree invariants.
pub struct FileCoordinator {
    metadata: MetadataStore,
    blobs: Arc<dyn BlobStore>,
    cache: TreeCache,
    seed_document_path: Option<PathBuf>,
    // serializes all mutating operations across all nodes
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for FileCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileCoordinator").finish_non_exhaustive()
    }
}

impl FileCoordinator {
    pub fn new(
        metadata: MetadataStore,
        blobs: Arc<dyn BlobStore>,
        seed_document_path: Option<PathBuf>,
    ) -> Self {
        Self {
            metadata,
            blobs,
            cache: TreeCache::new(),
            seed_document_path,
            write_lock: Mutex::new(()),
        }
    }

    fn snapshot(&self) -> CoreResult<Arc<Vec<FileMetadata>>> {
        self.cache.get_or_reload(|| {
            self.metadata
                .get_all()
                .map_err(|e| CoreError::from_store("get_all", "*", e))
        })
    }

    /// Flat listing of every live node, served from the snapshot cache.
    pub fn get_files(&self) -> CoreResult<Vec<FileItem>> {
        Ok(tree::flatten(&self.snapshot()?))
    }

    /// Nested listing of every live node, served from the snapshot cache.
    pub fn get_file_tree(&self) -> CoreResult<Vec<FileItem>> {
        Ok(tree::assemble(&self.snapshot()?))
    }

    /// Resolves one node's projection.
    ///
    /// Folders get their direct children attached. Non-folders get their
    /// blob content fetched and parsed into `data`; a missing blob or
    /// unparseable payload is tolerated and `data` is simply omitted.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] when no live record has this id.
    pub fn get_file_by_id(&self, id: &str) -> CoreResult<FileItem> {
        let metadata = self
            .metadata
            .get_by_id(id)
            .map_err(|e| CoreError::from_store("get_by_id", id, e))?;

        let mut item = metadata.to_item();
        item.path = tree::collapse_separators(&item.path);

        if metadata.is_folder {
            let children = self
                .metadata
                .get_by_parent_id(id)
                .map_err(|e| CoreError::from_store("get_by_parent_id", id, e))?;
            item.children = children.iter().map(FileMetadata::to_item).collect();
        } else if let Ok(bytes) = self.blobs.get(&blob_key(id)) {
            if let Ok(data) = serde_json::from_slice(&bytes) {
                item.data = Some(data);
            }
        }

        Ok(item)
    }

    /// Creates a node: metadata row first, then the blob side.
    ///
    /// Folders get a directory marker at the computed path. Non-folders
    /// with non-empty content get their payload uploaded under the id key.
    /// The blob write is only attempted after metadata success, so a
    /// duplicate id can never leave an orphaned blob; a crash between the
    /// two writes leaves a metadata row whose blob arrives with the first
    /// save.
    ///
    /// # Errors
    /// [`CoreError::Conflict`] when the id already exists.
    pub fn create_file(&self, metadata: &FileMetadata, content: Option<&[u8]>) -> CoreResult<()> {
        let _guard = self.write_lock.lock().expect("coordinator lock poisoned");

        self.metadata
            .create(metadata)
            .map_err(|e| CoreError::from_store("create", &metadata.id, e))?;

        if metadata.is_folder {
            self.blobs
                .create_folder(&metadata.path)
                .map_err(|e| CoreError::from_blob("create_folder", &metadata.id, e))?;
        } else if let Some(content) = content.filter(|c| !c.is_empty()) {
            self.blobs
                .put(&blob_key(&metadata.id), content, BLOB_CONTENT_TYPE)
                .map_err(|e| CoreError::from_blob("put", &metadata.id, e))?;
        }

        self.cache.invalidate();
        tracing::info!(
            id = %metadata.id,
            path = %metadata.path,
            is_folder = metadata.is_folder,
            "created file"
        );
        Ok(())
    }

    /// Replaces a document's content: metadata (size, timestamps) first,
    /// then the blob upload overwriting the prior object.
    ///
    /// If the blob upload fails the stores are inconsistent until a
    /// corrective retry; the error is surfaced, never rolled back.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] when no live record has this id.
    pub fn save_file(&self, id: &str, content: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().expect("coordinator lock poisoned");

        let mut metadata = self
            .metadata
            .get_by_id(id)
            .map_err(|e| CoreError::from_store("get_by_id", id, e))?;

        let now = Utc::now();
        metadata.size = content.len() as i64;
        metadata.last_modified = now;
        metadata.updated_at = now;

        self.metadata
            .update(&metadata)
            .map_err(|e| CoreError::from_store("update", id, e))?;

        self.blobs
            .put(&blob_key(id), content.as_bytes(), BLOB_CONTENT_TYPE)
            .map_err(|e| CoreError::from_blob("put", id, e))?;

        self.cache.invalidate();
        tracing::info!(id, size = content.len(), "saved file content");
        Ok(())
    }

    /// Renames a node and recomputes materialized paths.
    ///
    /// Non-folder names are canonicalized to the document extension. The
    /// node's path is recomputed from its parent's current path; for
    /// folders, every descendant's stored path is recomputed depth-first
    /// with the new prefix. Blob keys never change.
    ///
    /// # Errors
    /// - [`CoreError::NotFound`] when no live record has this id
    /// - [`CoreError::Invalid`] on an empty name or a detected cycle
    pub fn rename_file(&self, id: &str, new_name: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().expect("coordinator lock poisoned");

        let name = sketch_types::NodeName::new(new_name)
            .map_err(|e| CoreError::Invalid(e.to_string()))?;

        let mut metadata = self
            .metadata
            .get_by_id(id)
            .map_err(|e| CoreError::from_store("get_by_id", id, e))?;

        let new_name = if metadata.is_folder {
            name.into_string()
        } else {
            canonicalize_document_name(name.as_str())
        };

        let parent_path = if metadata.is_root() {
            "/".to_owned()
        } else {
            match self.metadata.get_by_id(&metadata.parent_id) {
                Ok(parent) => parent.path,
                // orphan tolerance: a dangling parent reference roots the node
                Err(_) => "/".to_owned(),
            }
        };
        let new_path = child_path(&parent_path, &new_name);

        metadata.name = new_name;
        metadata.path = new_path.clone();
        metadata.storage_path = new_path.clone();
        metadata.updated_at = Utc::now();

        self.metadata
            .update(&metadata)
            .map_err(|e| CoreError::from_store("update", id, e))?;

        if metadata.is_folder {
            let mut visited = HashSet::from([metadata.id.clone()]);
            self.update_descendant_paths(&metadata.id, &new_path, &mut visited, 0)?;
        }

        self.cache.invalidate();
        tracing::info!(id, path = %new_path, "renamed file");
        Ok(())
    }

    /// Depth-first recomputation of descendant paths under a renamed
    /// folder. The visited set and depth bound turn a corrupt (cyclic)
    /// parent chain into an `Invalid` error instead of unbounded recursion.
    fn update_descendant_paths(
        &self,
        parent_id: &str,
        parent_path: &str,
        visited: &mut HashSet<String>,
        depth: usize,
    ) -> CoreResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(CoreError::Invalid(format!(
                "folder nesting exceeds {MAX_TREE_DEPTH} levels under '{parent_id}'"
            )));
        }

        let children = self
            .metadata
            .get_by_parent_id(parent_id)
            .map_err(|e| CoreError::from_store("get_by_parent_id", parent_id, e))?;

        for mut child in children {
            if !visited.insert(child.id.clone()) {
                return Err(CoreError::Invalid(format!(
                    "cycle detected in parent chain at '{}'",
                    child.id
                )));
            }

            let new_path = child_path(parent_path, &child.name);
            child.path = new_path.clone();
            child.storage_path = new_path.clone();
            child.updated_at = Utc::now();

            self.metadata
                .update(&child)
                .map_err(|e| CoreError::from_store("update", &child.id, e))?;

            if child.is_folder {
                self.update_descendant_paths(&child.id, &new_path, visited, depth + 1)?;
            }
        }
        Ok(())
    }

    /// Deletes a node. Folders cascade post-order: every descendant goes
    /// first, through this same path. Non-folders lose their blob before
    /// their metadata row.
    ///
    /// The first failing descendant aborts the whole operation; a partially
    /// deleted subtree is then a possible (documented) state.
    ///
    /// # Errors
    /// [`CoreError::NotFound`] when no live record has this id.
    pub fn delete_file(&self, id: &str) -> CoreResult<()> {
        let _guard = self.write_lock.lock().expect("coordinator lock poisoned");

        let mut visited = HashSet::new();
        let result = self.delete_recursive(id, &mut visited, 0);
        // descendants may already be gone even when the cascade failed
        self.cache.invalidate();
        if result.is_ok() {
            tracing::info!(id, "deleted file");
        }
        result
    }

    fn delete_recursive(
        &self,
        id: &str,
        visited: &mut HashSet<String>,
        depth: usize,
    ) -> CoreResult<()> {
        if depth >= MAX_TREE_DEPTH {
            return Err(CoreError::Invalid(format!(
                "folder nesting exceeds {MAX_TREE_DEPTH} levels under '{id}'"
            )));
        }
        if !visited.insert(id.to_owned()) {
            return Err(CoreError::Invalid(format!(
                "cycle detected in parent chain at '{id}'"
            )));
        }

        let metadata = self
            .metadata
            .get_by_id(id)
            .map_err(|e| CoreError::from_store("get_by_id", id, e))?;

        if metadata.is_folder {
            let children = self
                .metadata
                .get_by_parent_id(id)
                .map_err(|e| CoreError::from_store("get_by_parent_id", id, e))?;
            for child in children {
                self.delete_recursive(&child.id, visited, depth + 1)?;
            }
        } else {
            // a document created empty has no blob yet; metadata stays
            // authoritative, so an absent blob is not an error here
            match self.blobs.delete(&blob_key(id)) {
                Ok(()) | Err(BlobError::NotFound(_)) => {}
                Err(e) => return Err(CoreError::from_blob("delete", id, e)),
            }
        }

        self.metadata
            .delete(id)
            .map_err(|e| CoreError::from_store("delete", id, e))
    }

    /// Fetches a document's raw content.
    ///
    /// A missing blob for the well-known seed id is self-healing: default
    /// content is materialized from the configured fallback file (or a
    /// built-in empty scene) and uploaded before being returned.
    pub fn get_file_content(&self, id: &str) -> CoreResult<String> {
        match self.blobs.get(&blob_key(id)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map_err(|_| CoreError::Internal(format!("content for '{id}' is not UTF-8"))),
            Err(BlobError::NotFound(_)) if id == SEED_DOCUMENT_ID => {
                let content = self.seed_content();
                self.blobs
                    .put(&blob_key(id), content.as_bytes(), BLOB_CONTENT_TYPE)
                    .map_err(|e| CoreError::from_blob("put", id, e))?;
                tracing::info!(id, "materialized seed document content");
                Ok(content)
            }
            Err(e) => Err(CoreError::from_blob("get", id, e)),
        }
    }

    fn seed_content(&self) -> String {
        if let Some(path) = &self.seed_document_path {
            match std::fs::read_to_string(path) {
                Ok(content) => return content,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "seed document unreadable, using built-in scene"
                    );
                }
            }
        }
        empty_scene()
    }
}

/// Built-in default document payload: an empty drawing scene.
pub fn empty_scene() -> String {
    serde_json::json!({
        "type": "sketchdeck",
        "version": 2,
        "source": "https://sketchdeck.app",
        "elements": [],
        "appState": {
            "viewBackgroundColor": "#ffffff",
            "gridSize": null
        }
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DOC_CONTENT_TYPE;
    use sketch_blobs::FsBlobStore;
    use sketch_store::Database;
    use tempfile::TempDir;

    fn coordinator() -> (TempDir, FileCoordinator) {
        let temp = TempDir::new().unwrap();
        let store = Database::open_in_memory().unwrap().metadata();
        let blobs = Arc::new(FsBlobStore::new(&temp.path().join("blobs")).unwrap());
        (temp, FileCoordinator::new(store, blobs, None))
    }

    fn record(id: &str, name: &str, parent_id: &str, path: &str, is_folder: bool) -> FileMetadata {
        let now = Utc::now();
        FileMetadata {
            id: id.into(),
            name: name.into(),
            is_folder,
            parent_id: parent_id.into(),
            storage_path: path.into(),
            path: path.into(),
            content_type: DOC_CONTENT_TYPE.into(),
            size: 0,
            last_modified: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn create_duplicate_id_is_conflict_and_leaves_no_blob() {
        let (_temp, coord) = coordinator();
        let folder = record("f1", "Docs", "", "/Docs", true);
        coord.create_file(&folder, None).unwrap();

        let dup = record("f1", "Other", "", "/Other", false);
        let err = coord.create_file(&dup, Some(b"{}")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
        // blob write never attempted after the metadata conflict
        assert!(matches!(
            coord.blobs.get(&blob_key("f1")),
            Err(BlobError::NotFound(_))
        ));
    }

    #[test]
    fn create_file_uploads_content_blob() {
        let (_temp, coord) = coordinator();
        let doc = record("d1", "a.sketch", "", "/a.sketch", false);
        coord.create_file(&doc, Some(b"{\"x\":1}")).unwrap();

        assert_eq!(coord.get_file_content("d1").unwrap(), "{\"x\":1}");
    }

    #[test]
    fn create_folder_places_directory_marker() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("f1", "Docs", "", "/Docs", true), None)
            .unwrap();
        let keys = coord.blobs.list("").unwrap();
        assert!(keys.contains(&"Docs/".to_string()));
    }

    #[test]
    fn save_then_get_content_round_trips() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), Some(b"{}"))
            .unwrap();

        coord.save_file("d1", "{\"x\":1}").unwrap();
        assert_eq!(coord.get_file_content("d1").unwrap(), "{\"x\":1}");

        let item = coord.get_file_by_id("d1").unwrap();
        assert_eq!(item.data, Some(serde_json::json!({"x": 1})));
    }

    #[test]
    fn save_missing_file_is_not_found() {
        let (_temp, coord) = coordinator();
        assert!(matches!(
            coord.save_file("ghost", "{}"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn save_updates_size_and_timestamps() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), None)
            .unwrap();

        coord.save_file("d1", "{\"elements\":[]}").unwrap();
        let listing = coord.get_files().unwrap();
        let item = listing.iter().find(|i| i.id == "d1").unwrap();
        assert!(item.last_modified > 0);
    }

    #[test]
    fn get_file_by_id_attaches_folder_children() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("f1", "Docs", "", "/Docs", true), None)
            .unwrap();
        coord
            .create_file(
                &record("d1", "a.sketch", "f1", "/Docs/a.sketch", false),
                Some(b"{}"),
            )
            .unwrap();

        let folder = coord.get_file_by_id("f1").unwrap();
        assert_eq!(folder.children.len(), 1);
        assert_eq!(folder.children[0].id, "d1");
    }

    #[test]
    fn get_file_by_id_tolerates_missing_blob_and_bad_json() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), None)
            .unwrap();
        // no blob at all
        assert!(coord.get_file_by_id("d1").unwrap().data.is_none());

        coord
            .blobs
            .put(&blob_key("d1"), b"not json", BLOB_CONTENT_TYPE)
            .unwrap();
        assert!(coord.get_file_by_id("d1").unwrap().data.is_none());
    }

    #[test]
    fn rename_document_canonicalizes_extension() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), Some(b"{}"))
            .unwrap();

        coord.rename_file("d1", "notes.json").unwrap();
        let item = coord.get_file_by_id("d1").unwrap();
        assert_eq!(item.name, "notes.sketch");
        assert_eq!(item.path, "/notes.sketch");
    }

    #[test]
    fn rename_rejects_empty_name() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), None)
            .unwrap();
        assert!(matches!(
            coord.rename_file("d1", "   "),
            Err(CoreError::Invalid(_))
        ));
    }

    #[test]
    fn rename_folder_updates_every_descendant_path() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("f1", "Docs", "", "/Docs", true), None)
            .unwrap();
        coord
            .create_file(&record("f2", "Sprints", "f1", "/Docs/Sprints", true), None)
            .unwrap();
        coord
            .create_file(
                &record("d1", "plan.sketch", "f2", "/Docs/Sprints/plan.sketch", false),
                Some(b"{}"),
            )
            .unwrap();

        coord.rename_file("f1", "Archive").unwrap();

        let listing = coord.get_files().unwrap();
        let path_of = |id: &str| {
            listing
                .iter()
                .find(|i| i.id == id)
                .map(|i| i.path.clone())
                .unwrap()
        };
        assert_eq!(path_of("f1"), "/Archive");
        assert_eq!(path_of("f2"), "/Archive/Sprints");
        assert_eq!(path_of("d1"), "/Archive/Sprints/plan.sketch");
        for path in ["/Archive", "/Archive/Sprints", "/Archive/Sprints/plan.sketch"] {
            assert!(!path.contains("//"));
        }

        // blob key unchanged: content still reachable under the old id
        assert_eq!(coord.get_file_content("d1").unwrap(), "{}");
    }

    #[test]
    fn rename_missing_file_is_not_found() {
        let (_temp, coord) = coordinator();
        assert!(matches!(
            coord.rename_file("ghost", "x"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn delete_document_removes_blob_and_metadata() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), Some(b"{}"))
            .unwrap();

        coord.delete_file("d1").unwrap();
        assert!(matches!(
            coord.get_file_by_id("d1"),
            Err(CoreError::NotFound { .. })
        ));
        assert!(matches!(
            coord.blobs.get(&blob_key("d1")),
            Err(BlobError::NotFound(_))
        ));
    }

    #[test]
    fn delete_folder_cascades_to_all_descendants() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("f1", "Docs", "", "/Docs", true), None)
            .unwrap();
        coord
            .create_file(&record("f2", "Sub", "f1", "/Docs/Sub", true), None)
            .unwrap();
        coord
            .create_file(
                &record("d1", "a.sketch", "f2", "/Docs/Sub/a.sketch", false),
                Some(b"{}"),
            )
            .unwrap();

        coord.delete_file("f1").unwrap();

        for id in ["f1", "f2", "d1"] {
            assert!(matches!(
                coord.get_file_by_id(id),
                Err(CoreError::NotFound { .. })
            ));
        }
        assert!(matches!(
            coord.blobs.get(&blob_key("d1")),
            Err(BlobError::NotFound(_))
        ));
        assert!(coord.metadata.get_by_parent_id("f1").unwrap().is_empty());
        assert!(coord.metadata.get_by_parent_id("f2").unwrap().is_empty());
    }

    #[test]
    fn delete_tolerates_document_without_blob() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), None)
            .unwrap();
        coord.delete_file("d1").unwrap();
    }

    #[test]
    fn delete_missing_file_is_not_found() {
        let (_temp, coord) = coordinator();
        assert!(matches!(
            coord.delete_file("ghost"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn get_content_of_unknown_id_is_not_found() {
        let (_temp, coord) = coordinator();
        assert!(matches!(
            coord.get_file_content("ghost"),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn seed_document_self_heals_from_builtin_scene() {
        let (_temp, coord) = coordinator();
        let content = coord.get_file_content(SEED_DOCUMENT_ID).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["type"], "sketchdeck");

        // uploaded on first access, so the second read hits the blob store
        assert_eq!(coord.get_file_content(SEED_DOCUMENT_ID).unwrap(), content);
    }

    #[test]
    fn seed_document_prefers_configured_fallback_file() {
        let temp = TempDir::new().unwrap();
        let seed_path = temp.path().join("seed.sketch");
        std::fs::write(&seed_path, "{\"type\":\"sketchdeck\",\"elements\":[1]}").unwrap();

        let store = Database::open_in_memory().unwrap().metadata();
        let blobs = Arc::new(FsBlobStore::new(&temp.path().join("blobs")).unwrap());
        let coord = FileCoordinator::new(store, blobs, Some(seed_path));

        let content = coord.get_file_content(SEED_DOCUMENT_ID).unwrap();
        assert!(content.contains("\"elements\":[1]"));
    }

    #[test]
    fn listing_is_cached_until_a_mutation_completes() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("d1", "a.sketch", "", "/a.sketch", false), None)
            .unwrap();

        let before = coord.get_files().unwrap();
        assert_eq!(before.len(), 1);

        coord
            .create_file(&record("d2", "b.sketch", "", "/b.sketch", false), None)
            .unwrap();
        let after = coord.get_files().unwrap();
        assert_eq!(after.len(), 2);
    }

    #[test]
    fn tree_listing_nests_children() {
        let (_temp, coord) = coordinator();
        coord
            .create_file(&record("f1", "Docs", "", "/Docs", true), None)
            .unwrap();
        coord
            .create_file(
                &record("d1", "a.sketch", "f1", "/Docs/a.sketch", false),
                Some(b"{}"),
            )
            .unwrap();

        let tree = coord.get_file_tree().unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].id, "d1");
    }
}
