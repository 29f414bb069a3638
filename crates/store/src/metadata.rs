//! Metadata Store Adapter.
//!
//! Persists [`FileMetadata`] rows for every node in the drawing hierarchy.
//! Reads filter soft-deleted rows and return rows in insertion (rowid)
//! order, which keeps tree assembly deterministic. `delete` is a hard
//! delete; the coordinator removes blobs first and then issues it for full
//! removal.

use crate::{map_sqlite_error, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use sketch_types::FileMetadata;
use std::sync::{Arc, Mutex};

/// CRUD over the `files` table.
#[derive(Clone)]
pub struct MetadataStore {
    conn: Arc<Mutex<Connection>>,
}

impl std::fmt::Debug for MetadataStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetadataStore").finish_non_exhaustive()
    }
}

const SELECT_COLUMNS: &str = "id, name, is_folder, parent_id, storage_path, path, \
     content_type, size, last_modified, created_at, updated_at, deleted_at";

fn row_to_metadata(row: &Row<'_>) -> rusqlite::Result<FileMetadata> {
    Ok(FileMetadata {
        id: row.get(0)?,
        name: row.get(1)?,
        is_folder: row.get(2)?,
        parent_id: row.get(3)?,
        storage_path: row.get(4)?,
        path: row.get(5)?,
        content_type: row.get(6)?,
        size: row.get(7)?,
        last_modified: row.get::<_, DateTime<Utc>>(8)?,
        created_at: row.get::<_, DateTime<Utc>>(9)?,
        updated_at: row.get::<_, DateTime<Utc>>(10)?,
        deleted_at: row.get::<_, Option<DateTime<Utc>>>(11)?,
    })
}

impl MetadataStore {
    pub(crate) fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// Returns every live (not soft-deleted) record, in insertion order.
    pub fn get_all(&self) -> StoreResult<Vec<FileMetadata>> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM files WHERE deleted_at IS NULL ORDER BY rowid"
        ))?;
        let rows = stmt.query_map([], row_to_metadata)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Fetches one live record by id.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no live row has this id.
    pub fn get_by_id(&self, id: &str) -> StoreResult<FileMetadata> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        conn.query_row(
            &format!("SELECT {SELECT_COLUMNS} FROM files WHERE id = ?1 AND deleted_at IS NULL"),
            params![id],
            row_to_metadata,
        )
        .optional()?
        .ok_or(StoreError::NotFound)
    }

    /// Returns the live direct children of `parent_id`, in insertion order.
    pub fn get_by_parent_id(&self, parent_id: &str) -> StoreResult<Vec<FileMetadata>> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM files \
             WHERE parent_id = ?1 AND deleted_at IS NULL ORDER BY rowid"
        ))?;
        let rows = stmt.query_map(params![parent_id], row_to_metadata)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// Inserts a new record.
    ///
    /// # Errors
    /// [`StoreError::Conflict`] when a row with the same id already exists.
    pub fn create(&self, metadata: &FileMetadata) -> StoreResult<()> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        conn.execute(
            "INSERT INTO files (id, name, is_folder, parent_id, storage_path, path, \
             content_type, size, last_modified, created_at, updated_at, deleted_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                metadata.id,
                metadata.name,
                metadata.is_folder,
                metadata.parent_id,
                metadata.storage_path,
                metadata.path,
                metadata.content_type,
                metadata.size,
                metadata.last_modified,
                metadata.created_at,
                metadata.updated_at,
                metadata.deleted_at,
            ],
        )
        .map_err(map_sqlite_error)?;
        Ok(())
    }

    /// Persists every mutable field of an existing record.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no live row has this id.
    pub fn update(&self, metadata: &FileMetadata) -> StoreResult<()> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        let changed = conn.execute(
            "UPDATE files SET name = ?2, parent_id = ?3, storage_path = ?4, path = ?5, \
             content_type = ?6, size = ?7, last_modified = ?8, updated_at = ?9 \
             WHERE id = ?1 AND deleted_at IS NULL",
            params![
                metadata.id,
                metadata.name,
                metadata.parent_id,
                metadata.storage_path,
                metadata.path,
                metadata.content_type,
                metadata.size,
                metadata.last_modified,
                metadata.updated_at,
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Marks a record soft-deleted without removing the row.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no live row has this id.
    pub fn soft_delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        let changed = conn.execute(
            "UPDATE files SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
            params![id, Utc::now()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    /// Hard-deletes a record, soft-deleted or not.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] when no row has this id.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        let conn = self.conn.lock().expect("metadata store lock poisoned");
        let changed = conn.execute("DELETE FROM files WHERE id = ?1", params![id])?;
        if changed == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    fn record(id: &str, name: &str, parent_id: &str, is_folder: bool) -> FileMetadata {
        let now = Utc::now();
        FileMetadata {
            id: id.into(),
            name: name.into(),
            is_folder,
            parent_id: parent_id.into(),
            storage_path: format!("/{name}"),
            path: format!("/{name}"),
            content_type: "application/vnd.sketchdeck+json".into(),
            size: 0,
            last_modified: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn create_and_get_round_trip() {
        let store = Database::open_in_memory().unwrap().metadata();
        let rec = record("f1", "Docs", "", true);
        store.create(&rec).unwrap();

        let fetched = store.get_by_id("f1").unwrap();
        assert_eq!(fetched.name, "Docs");
        assert!(fetched.is_folder);
        assert!(fetched.is_root());
    }

    #[test]
    fn create_duplicate_id_is_conflict() {
        let store = Database::open_in_memory().unwrap().metadata();
        store.create(&record("f1", "Docs", "", true)).unwrap();
        let err = store.create(&record("f1", "Other", "", true)).unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }

    #[test]
    fn get_all_preserves_insertion_order() {
        let store = Database::open_in_memory().unwrap().metadata();
        store.create(&record("b", "beta", "", false)).unwrap();
        store.create(&record("a", "alpha", "", false)).unwrap();
        store.create(&record("c", "gamma", "", false)).unwrap();

        let ids: Vec<String> = store.get_all().unwrap().into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn get_by_parent_id_lists_direct_children_only() {
        let store = Database::open_in_memory().unwrap().metadata();
        store.create(&record("f1", "Docs", "", true)).unwrap();
        store.create(&record("d1", "a", "f1", false)).unwrap();
        store.create(&record("f2", "Sub", "f1", true)).unwrap();
        store.create(&record("d2", "b", "f2", false)).unwrap();

        let children = store.get_by_parent_id("f1").unwrap();
        let ids: Vec<&str> = children.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["d1", "f2"]);
    }

    #[test]
    fn update_missing_row_is_not_found() {
        let store = Database::open_in_memory().unwrap().metadata();
        let err = store.update(&record("ghost", "x", "", false)).unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[test]
    fn soft_deleted_rows_disappear_from_reads_but_hard_delete_finds_them() {
        let store = Database::open_in_memory().unwrap().metadata();
        store.create(&record("d1", "a", "", false)).unwrap();
        store.soft_delete("d1").unwrap();

        assert!(matches!(store.get_by_id("d1"), Err(StoreError::NotFound)));
        assert!(store.get_all().unwrap().is_empty());

        // full removal still works on a soft-deleted row
        store.delete("d1").unwrap();
        assert!(matches!(store.delete("d1"), Err(StoreError::NotFound)));
    }

    #[test]
    fn delete_missing_row_is_not_found() {
        let store = Database::open_in_memory().unwrap().metadata();
        assert!(matches!(store.delete("ghost"), Err(StoreError::NotFound)));
    }

    #[test]
    fn update_persists_path_changes() {
        let store = Database::open_in_memory().unwrap().metadata();
        store.create(&record("f1", "Docs", "", true)).unwrap();

        let mut rec = store.get_by_id("f1").unwrap();
        rec.name = "Archive".into();
        rec.path = "/Archive".into();
        rec.storage_path = "/Archive".into();
        store.update(&rec).unwrap();

        let fetched = store.get_by_id("f1").unwrap();
        assert_eq!(fetched.name, "Archive");
        assert_eq!(fetched.path, "/Archive");
    }
}
