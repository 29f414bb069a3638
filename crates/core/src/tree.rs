//! Tree assembly and path computation.
//!
//! Pure transformations from an unordered collection of [`FileMetadata`]
//! records into a nested hierarchy or a flat listing. Nothing in here
//! touches a store; callers are responsible for filtering soft-deleted
//! records before assembly.
//!
//! Ordering is whatever the input carries: insertion order is preserved
//! for both roots and children, and no sorting is imposed. A node whose
//! parent id does not appear in the input is treated as a root (orphan
//! tolerance). Traversal depth is bounded by
//! [`MAX_TREE_DEPTH`](crate::constants::MAX_TREE_DEPTH), so corrupt parent
//! references can truncate a branch but never hang the process.

use crate::constants::{DOC_EXTENSION, MAX_TREE_DEPTH, STRIPPED_EXTENSION};
use sketch_types::{FileItem, FileMetadata};
use std::collections::HashMap;

/// Collapses duplicate `/` separators until none remain.
pub fn collapse_separators(path: &str) -> String {
    let mut path = path.to_owned();
    while path.contains("//") {
        path = path.replace("//", "/");
    }
    path
}

/// Joins a parent's materialized path and a child name into the child's
/// materialized path.
pub fn child_path(parent_path: &str, name: &str) -> String {
    collapse_separators(&format!("{}/{}", parent_path.trim_end_matches('/'), name))
}

/// Rewrites a document name to carry the canonical extension.
///
/// Folder names pass through untouched elsewhere; this is only called for
/// non-folder nodes. A conflicting default extension is stripped first, so
/// `shapes.json` becomes `shapes.sketch`, not `shapes.json.sketch`.
pub fn canonicalize_document_name(name: &str) -> String {
    if name.ends_with(DOC_EXTENSION) {
        return name.to_owned();
    }
    let stem = name.strip_suffix(STRIPPED_EXTENSION).unwrap_or(name);
    format!("{stem}{DOC_EXTENSION}")
}

/// Projects every record into a flat [`FileItem`] list, all fields
/// preserved, in input order.
pub fn flatten(records: &[FileMetadata]) -> Vec<FileItem> {
    records
        .iter()
        .map(|record| {
            let mut item = record.to_item();
            item.path = collapse_separators(&item.path);
            item
        })
        .collect()
}

/// Assembles records into a nested tree rooted at nodes with an empty
/// parent id or a parent absent from the input.
///
/// Idempotent: assembling unchanged data twice yields identical output.
/// Nodes only reachable through a cycle (including self-parents) are never
/// reachable from a root and are therefore omitted.
pub fn assemble(records: &[FileMetadata]) -> Vec<FileItem> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(records.len());
    for (i, record) in records.iter().enumerate() {
        index.insert(record.id.as_str(), i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots: Vec<usize> = Vec::new();
    for (i, record) in records.iter().enumerate() {
        match index.get(record.parent_id.as_str()) {
            Some(&parent) if !record.is_root() => children[parent].push(i),
            _ => roots.push(i),
        }
    }

    fn build(
        i: usize,
        depth: usize,
        records: &[FileMetadata],
        children: &[Vec<usize>],
    ) -> FileItem {
        let mut item = records[i].to_item();
        item.path = collapse_separators(&item.path);
        if depth < MAX_TREE_DEPTH {
            for &child in &children[i] {
                item.children.push(build(child, depth + 1, records, children));
            }
        }
        item
    }

    roots
        .into_iter()
        .map(|i| build(i, 0, records, &children))
        .collect()
}

/// Computes a node's materialized path from its ancestors' names.
///
/// Walks the parent chain root-ward, then joins the names root→leaf with
/// `/`. The walk stops at the depth bound or when a parent id is absent
/// from the input (the node is then rooted at its nearest present
/// ancestor).
pub fn materialized_path(records: &[FileMetadata], id: &str) -> Option<String> {
    let by_id: HashMap<&str, &FileMetadata> =
        records.iter().map(|r| (r.id.as_str(), r)).collect();

    let mut node = *by_id.get(id)?;
    let mut names = vec![node.name.as_str()];
    for _ in 0..MAX_TREE_DEPTH {
        if node.is_root() {
            break;
        }
        match by_id.get(node.parent_id.as_str()) {
            Some(parent) => {
                names.push(parent.name.as_str());
                node = parent;
            }
            None => break,
        }
    }
    names.reverse();
    Some(collapse_separators(&format!("/{}", names.join("/"))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(id: &str, name: &str, parent_id: &str, is_folder: bool) -> FileMetadata {
        let now = Utc::now();
        FileMetadata {
            id: id.into(),
            name: name.into(),
            is_folder,
            parent_id: parent_id.into(),
            storage_path: String::new(),
            path: String::new(),
            content_type: "application/vnd.sketchdeck+json".into(),
            size: 0,
            last_modified: now,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn with_path(mut r: FileMetadata, path: &str) -> FileMetadata {
        r.path = path.into();
        r.storage_path = path.into();
        r
    }

    fn collect_ids(items: &[FileItem], out: &mut Vec<String>) {
        for item in items {
            out.push(item.id.clone());
            collect_ids(&item.children, out);
        }
    }

    #[test]
    fn collapse_separators_removes_all_duplicates() {
        assert_eq!(collapse_separators("/a//b"), "/a/b");
        assert_eq!(collapse_separators("///a////b"), "/a/b");
        assert_eq!(collapse_separators("/a/b"), "/a/b");
    }

    #[test]
    fn child_path_joins_without_doubling() {
        assert_eq!(child_path("/", "a.sketch"), "/a.sketch");
        assert_eq!(child_path("/Docs", "a.sketch"), "/Docs/a.sketch");
        assert_eq!(child_path("/Docs/", "a.sketch"), "/Docs/a.sketch");
    }

    #[test]
    fn canonicalize_appends_extension() {
        assert_eq!(canonicalize_document_name("a"), "a.sketch");
        assert_eq!(canonicalize_document_name("a.sketch"), "a.sketch");
        assert_eq!(canonicalize_document_name("a.json"), "a.sketch");
    }

    #[test]
    fn assemble_nests_children_under_parents() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("d1", "a.sketch", "f1", false),
            record("d2", "b.sketch", "f1", false),
            record("d3", "root.sketch", "", false),
        ];

        let tree = assemble(&records);
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, "f1");
        let child_ids: Vec<&str> = tree[0].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, vec!["d1", "d2"]);
        assert_eq!(tree[1].id, "d3");
    }

    #[test]
    fn assemble_preserves_id_set() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("f2", "Sub", "f1", true),
            record("d1", "a.sketch", "f2", false),
            record("d2", "b.sketch", "f1", false),
        ];

        let mut ids = Vec::new();
        collect_ids(&assemble(&records), &mut ids);
        ids.sort();
        assert_eq!(ids, vec!["d1", "d2", "f1", "f2"]);
    }

    #[test]
    fn assemble_treats_orphans_as_roots() {
        let records = vec![
            record("d1", "lost.sketch", "missing-parent", false),
            record("f1", "Docs", "", true),
        ];

        let tree = assemble(&records);
        let root_ids: Vec<&str> = tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(root_ids, vec!["d1", "f1"]);
    }

    #[test]
    fn assemble_child_order_follows_input_order() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("z", "z.sketch", "f1", false),
            record("a", "a.sketch", "f1", false),
        ];

        let tree = assemble(&records);
        let child_ids: Vec<&str> = tree[0].children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(child_ids, vec!["z", "a"]);
    }

    #[test]
    fn assemble_is_idempotent_over_flatten() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("f2", "Sub", "f1", true),
            record("d1", "a.sketch", "f2", false),
        ];

        let first = assemble(&records);

        // rebuild metadata from the flat projection and assemble again
        let reflattened: Vec<FileMetadata> = flatten(&records)
            .iter()
            .map(|item| {
                let original = records.iter().find(|r| r.id == item.id).unwrap();
                original.clone()
            })
            .collect();
        let second = assemble(&reflattened);

        assert_eq!(first, second);
    }

    #[test]
    fn assemble_terminates_on_self_parent() {
        let records = vec![
            record("loop", "Loop", "loop", true),
            record("f1", "Docs", "", true),
        ];

        // the self-parented node is unreachable from any root; everything
        // else assembles normally
        let tree = assemble(&records);
        let root_ids: Vec<&str> = tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(root_ids, vec!["f1"]);
    }

    #[test]
    fn assemble_terminates_on_two_node_cycle() {
        let records = vec![
            record("a", "A", "b", true),
            record("b", "B", "a", true),
            record("d1", "ok.sketch", "", false),
        ];

        let tree = assemble(&records);
        let root_ids: Vec<&str> = tree.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(root_ids, vec!["d1"]);
    }

    #[test]
    fn flatten_collapses_double_separators() {
        let records = vec![with_path(record("d1", "a.sketch", "", false), "/Docs//a.sketch")];
        let items = flatten(&records);
        assert_eq!(items[0].path, "/Docs/a.sketch");
    }

    #[test]
    fn materialized_path_joins_ancestor_names() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("f2", "Sprints", "f1", true),
            record("d1", "plan.sketch", "f2", false),
        ];

        assert_eq!(
            materialized_path(&records, "d1").unwrap(),
            "/Docs/Sprints/plan.sketch"
        );
        assert_eq!(materialized_path(&records, "f1").unwrap(), "/Docs");
        assert!(materialized_path(&records, "ghost").is_none());
    }

    #[test]
    fn materialized_path_has_no_double_separator() {
        let records = vec![
            record("f1", "Docs", "", true),
            record("d1", "a.sketch", "f1", false),
        ];
        let path = materialized_path(&records, "d1").unwrap();
        assert!(!path.contains("//"));
        assert!(path.starts_with('/'));
    }
}
