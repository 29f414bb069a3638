//! Node identifier utilities.
//!
//! Every node in the drawing hierarchy is keyed by an opaque identifier that
//! is generated once at creation and never changes. Sketchdeck uses a
//! *canonical* representation for these identifiers: **32 lowercase
//! hexadecimal characters** (no hyphens), produced from a time-ordered
//! (version 7) UUID so that freshly created nodes sort after older ones in
//! the metadata store.
//!
//! This module provides:
//! - A small wrapper type ([`FileId`]) that *guarantees* the canonical format
//!   once constructed.
//! - Strict validation for externally supplied identifiers.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `0197a1b2c3d4e5f60718293a4b5c6d7e`
//!
//! Notes:
//! - This is the value you would get from `Uuid::now_v7().simple().to_string()`.
//! - Non-canonical values (uppercase, hyphenated, wrong length, non-hex) are
//!   rejected by [`FileId::parse`]. A handful of well-known seed identifiers
//!   bypass this type entirely; they are plain strings owned by the core.

mod service;

pub use service::{FileId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum IdError {
    /// Invalid input provided
    #[error("invalid identifier: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type IdResult<T> = Result<T, IdError>;
