//! File-tree entity and projection types.
//!
//! [`FileMetadata`] is the persisted record for one node (file or folder) in
//! the drawing hierarchy; it lives in the relational store. [`FileItem`] is
//! the projection returned to API clients, optionally carrying `children`
//! (when assembled as a tree) and `data` (parsed document content for
//! non-folder nodes). Wire field names are camelCase to match the frontend
//! contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted metadata for one node in the file hierarchy.
///
/// The `id` is an opaque, immutable, time-ordered identifier. `parent_id` is
/// the empty string for root-level nodes. `path` and `storage_path` hold the
/// materialized absolute path derived from ancestor names; they are
/// recomputed whenever an ancestor is renamed. `deleted_at` is the
/// soft-delete marker maintained by the metadata store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    pub id: String,
    pub name: String,
    pub is_folder: bool,
    #[serde(default)]
    pub parent_id: String,
    pub storage_path: String,
    pub path: String,
    pub content_type: String,
    pub size: i64,
    pub last_modified: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl FileMetadata {
    /// Projects this record into a [`FileItem`] for API responses.
    ///
    /// `children` and `data` start empty; the tree assembler attaches
    /// children, and the coordinator attaches parsed content where requested.
    /// `last_modified` is converted to Unix milliseconds.
    pub fn to_item(&self) -> FileItem {
        FileItem {
            id: self.id.clone(),
            name: self.name.clone(),
            is_folder: self.is_folder,
            children: Vec::new(),
            data: None,
            last_modified: self.last_modified.timestamp_millis(),
            parent_id: self.parent_id.clone(),
            is_expanded: false,
            path: self.path.clone(),
        }
    }

    /// True when this node sits at the root of the hierarchy.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_empty()
    }
}

/// API projection of one or more [`FileMetadata`] records.
///
/// Flat listings leave `children` empty; tree assembly fills it. `data` is
/// only populated for non-folder nodes when content was requested and parsed
/// successfully.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    pub id: String,
    pub name: String,
    pub is_folder: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<FileItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub last_modified: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_expanded: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub path: String,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}
