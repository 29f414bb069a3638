//! # Sketch Core
//!
//! Core business logic for the Sketchdeck drawing backend.
//!
//! This crate owns the file-system metadata and content synchronization
//! model: the hierarchical metadata tree lives in a relational store
//! (`sketch-store`), flat document blobs live in an object store
//! (`sketch-blobs`), and the [`coordinator::FileCoordinator`] is the only
//! component allowed to mutate both. It keeps paths, parent/child
//! relationships, renames and deletes consistent across the two stores.
//!
//! - [`tree`]: pure assembly of flat metadata into nested trees and flat
//!   listings, with materialized-path computation
//! - [`cache`]: explicit snapshot cache with a reload-on-mutation contract
//! - [`coordinator`]: cross-store orchestration of create/save/rename/delete
//! - [`files`]: thin use-case facade for delivery handlers
//! - [`users`]: accounts and sessions
//!
//! **No API concerns**: HTTP routing, status mapping, and OpenAPI belong in
//! `api-rest`.

pub mod cache;
pub mod config;
pub mod constants;
pub mod coordinator;
mod error;
pub mod files;
pub mod tree;
pub mod users;

pub use config::CoreConfig;
pub use coordinator::FileCoordinator;
pub use error::{CoreError, CoreResult};
pub use files::{FileService, NewFileParams};
pub use users::UserService;

pub use sketch_types::{FileItem, FileMetadata, NodeName, User, UserInfo, UserKind};
pub use sketch_uuid::FileId;
