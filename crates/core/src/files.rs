//! Use-case facade for file-tree operations.
//!
//! [`FileService`] is what delivery handlers talk to: a thin pass-through to
//! the [`FileCoordinator`](crate::FileCoordinator) plus the assembly of a
//! fully-populated [`FileMetadata`] from creation parameters (fresh id,
//! extension canonicalization, parent-path resolution, default content for
//! documents created empty), so nothing HTTP-shaped reaches the coordinator
//! and nothing tree-shaped leaks into handlers.

use crate::constants::DOC_CONTENT_TYPE;
use crate::coordinator::{empty_scene, FileCoordinator};
use crate::tree::{canonicalize_document_name, child_path};
use crate::{CoreError, CoreResult, FileId};
use chrono::Utc;
use sketch_types::{FileItem, FileMetadata, NodeName};
use std::sync::Arc;

/// Parameters for creating a node, as supplied by a client.
#[derive(Debug, Clone, Default)]
pub struct NewFileParams {
    pub name: String,
    pub parent_id: String,
    pub is_folder: bool,
    pub content: Option<String>,
}

/// Facade exposing coordinator operations to delivery handlers.
#[derive(Clone)]
pub struct FileService {
    coordinator: Arc<FileCoordinator>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish_non_exhaustive()
    }
}

impl FileService {
    pub fn new(coordinator: Arc<FileCoordinator>) -> Self {
        Self { coordinator }
    }

    /// Creates a node from client parameters and returns its projection.
    ///
    /// A fresh time-ordered id is generated; non-folder names are
    /// canonicalized to the document extension; the materialized path is
    /// derived from the parent's current path (a missing parent roots the
    /// node). Documents created without content receive the built-in empty
    /// scene so a blob exists from the start. Supplying content forces the
    /// node to be a document even if `is_folder` was set.
    ///
    /// # Errors
    /// - [`CoreError::Invalid`] on an empty or separator-carrying name
    /// - [`CoreError::Conflict`] on an id collision
    pub fn create_file(&self, params: NewFileParams) -> CoreResult<FileItem> {
        let name =
            NodeName::new(&params.name).map_err(|e| CoreError::Invalid(e.to_string()))?;

        let has_content = params.content.as_deref().is_some_and(|c| !c.is_empty());
        let is_folder = params.is_folder && !has_content;

        let file_name = if is_folder {
            name.into_string()
        } else {
            canonicalize_document_name(name.as_str())
        };

        let parent_path = if params.parent_id.is_empty() {
            "/".to_owned()
        } else {
            match self.coordinator.get_file_by_id(&params.parent_id) {
                Ok(parent) if !parent.path.is_empty() => parent.path,
                // a dangling parent reference roots the node
                _ => "/".to_owned(),
            }
        };
        let storage_path = child_path(&parent_path, &file_name);

        let content = if is_folder {
            None
        } else {
            Some(params.content.filter(|c| !c.is_empty()).unwrap_or_else(empty_scene))
        };

        let now = Utc::now();
        let metadata = FileMetadata {
            id: FileId::new().to_string(),
            name: file_name,
            is_folder,
            parent_id: params.parent_id,
            storage_path: storage_path.clone(),
            path: storage_path,
            content_type: DOC_CONTENT_TYPE.to_owned(),
            size: content.as_deref().map_or(0, |c| c.len() as i64),
            last_modified: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };

        self.coordinator
            .create_file(&metadata, content.as_deref().map(str::as_bytes))?;
        Ok(metadata.to_item())
    }

    /// Flat listing of every live node.
    pub fn get_files(&self) -> CoreResult<Vec<FileItem>> {
        self.coordinator.get_files()
    }

    /// Nested listing of every live node.
    pub fn get_file_tree(&self) -> CoreResult<Vec<FileItem>> {
        self.coordinator.get_file_tree()
    }

    /// One node's projection, with children (folders) or parsed content
    /// (documents) attached.
    pub fn get_file_by_id(&self, id: &str) -> CoreResult<FileItem> {
        self.coordinator.get_file_by_id(id)
    }

    /// Replaces a document's content.
    pub fn save_file(&self, id: &str, content: &str) -> CoreResult<()> {
        self.coordinator.save_file(id, content)
    }

    /// Renames a node, cascading path recomputation to descendants.
    pub fn rename_file(&self, id: &str, new_name: &str) -> CoreResult<()> {
        self.coordinator.rename_file(id, new_name)
    }

    /// Deletes a node, cascading through descendants first.
    pub fn delete_file(&self, id: &str) -> CoreResult<()> {
        self.coordinator.delete_file(id)
    }

    /// A document's raw content.
    pub fn get_file_content(&self, id: &str) -> CoreResult<String> {
        self.coordinator.get_file_content(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketch_blobs::FsBlobStore;
    use sketch_store::Database;
    use tempfile::TempDir;

    fn service() -> (TempDir, FileService) {
        let temp = TempDir::new().unwrap();
        let store = Database::open_in_memory().unwrap().metadata();
        let blobs = Arc::new(FsBlobStore::new(&temp.path().join("blobs")).unwrap());
        let coordinator = Arc::new(FileCoordinator::new(store, blobs, None));
        (temp, FileService::new(coordinator))
    }

    #[test]
    fn create_document_in_folder_gets_canonical_name_and_path() {
        let (_temp, svc) = service();
        let folder = svc
            .create_file(NewFileParams {
                name: "Docs".into(),
                is_folder: true,
                ..Default::default()
            })
            .unwrap();
        assert!(folder.is_folder);
        assert_eq!(folder.path, "/Docs");

        let doc = svc
            .create_file(NewFileParams {
                name: "a".into(),
                parent_id: folder.id.clone(),
                content: Some("{}".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(doc.name, "a.sketch");
        assert_eq!(doc.path, "/Docs/a.sketch");
    }

    #[test]
    fn create_generates_canonical_unique_ids() {
        let (_temp, svc) = service();
        let first = svc
            .create_file(NewFileParams {
                name: "one".into(),
                ..Default::default()
            })
            .unwrap();
        let second = svc
            .create_file(NewFileParams {
                name: "two".into(),
                ..Default::default()
            })
            .unwrap();

        assert!(FileId::parse(&first.id).is_ok());
        assert!(FileId::parse(&second.id).is_ok());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn empty_document_receives_default_scene() {
        let (_temp, svc) = service();
        let doc = svc
            .create_file(NewFileParams {
                name: "blank".into(),
                ..Default::default()
            })
            .unwrap();

        let content = svc.get_file_content(&doc.id).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["type"], "sketchdeck");
        assert_eq!(value["elements"], serde_json::json!([]));
    }

    #[test]
    fn content_overrides_folder_flag() {
        let (_temp, svc) = service();
        let item = svc
            .create_file(NewFileParams {
                name: "looks-like-folder".into(),
                is_folder: true,
                content: Some("{\"x\":1}".into()),
                ..Default::default()
            })
            .unwrap();
        assert!(!item.is_folder);
        assert_eq!(item.name, "looks-like-folder.sketch");
    }

    #[test]
    fn create_with_empty_name_is_invalid() {
        let (_temp, svc) = service();
        let err = svc
            .create_file(NewFileParams {
                name: "  ".into(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, CoreError::Invalid(_)));
    }

    #[test]
    fn create_under_missing_parent_roots_the_node() {
        let (_temp, svc) = service();
        let doc = svc
            .create_file(NewFileParams {
                name: "stray".into(),
                parent_id: "does-not-exist".into(),
                content: Some("{}".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(doc.path, "/stray.sketch");
    }

    #[test]
    fn rename_then_lookup_reflects_new_prefix() {
        let (_temp, svc) = service();
        let folder = svc
            .create_file(NewFileParams {
                name: "Docs".into(),
                is_folder: true,
                ..Default::default()
            })
            .unwrap();
        let doc = svc
            .create_file(NewFileParams {
                name: "a".into(),
                parent_id: folder.id.clone(),
                content: Some("{}".into()),
                ..Default::default()
            })
            .unwrap();

        svc.rename_file(&folder.id, "Archive").unwrap();
        let fetched = svc.get_file_by_id(&doc.id).unwrap();
        assert!(fetched.path.starts_with("/Archive/"));
    }

    #[test]
    fn delete_folder_makes_descendants_unresolvable() {
        let (_temp, svc) = service();
        let folder = svc
            .create_file(NewFileParams {
                name: "Docs".into(),
                is_folder: true,
                ..Default::default()
            })
            .unwrap();
        let doc = svc
            .create_file(NewFileParams {
                name: "a".into(),
                parent_id: folder.id.clone(),
                content: Some("{}".into()),
                ..Default::default()
            })
            .unwrap();

        svc.delete_file(&folder.id).unwrap();
        assert!(matches!(
            svc.get_file_by_id(&doc.id),
            Err(CoreError::NotFound { .. })
        ));
    }

    #[test]
    fn save_round_trips_exact_content() {
        let (_temp, svc) = service();
        let doc = svc
            .create_file(NewFileParams {
                name: "d".into(),
                content: Some("{}".into()),
                ..Default::default()
            })
            .unwrap();

        svc.save_file(&doc.id, "{\"x\":1}").unwrap();
        assert_eq!(svc.get_file_content(&doc.id).unwrap(), "{\"x\":1}");
    }
}
