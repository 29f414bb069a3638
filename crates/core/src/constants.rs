//! Constants used throughout the core crate.

/// Canonical extension for drawing documents. Non-folder names are rewritten
/// to end with this at write time.
pub const DOC_EXTENSION: &str = ".sketch";

/// Default extension stripped from incoming document names before the
/// canonical one is appended.
pub const STRIPPED_EXTENSION: &str = ".json";

/// Content type recorded in metadata for drawing documents.
pub const DOC_CONTENT_TYPE: &str = "application/vnd.sketchdeck+json";

/// Content type used for blob uploads of document payloads.
pub const BLOB_CONTENT_TYPE: &str = "application/json";

/// Fixed suffix appended to a node id to form its blob key.
pub const BLOB_KEY_SUFFIX: &str = ".json";

/// Well-known id of the seed document whose content is lazily materialized
/// when its blob is missing.
pub const SEED_DOCUMENT_ID: &str = "welcome-board";

/// Maximum depth any tree traversal will descend. The hierarchy is
/// unbounded by contract, but traversal must terminate even on corrupt
/// (cyclic) parent references.
pub const MAX_TREE_DEPTH: usize = 64;

/// Default directory for database and blob storage when none is configured.
pub const DEFAULT_DATA_DIR: &str = "sketch_data";

/// Filename of the metadata database inside the data directory.
pub const DATABASE_FILENAME: &str = "sketchdeck.db";

/// Directory for blob objects inside the data directory.
pub const BLOBS_DIR_NAME: &str = "blobs";

/// Lifetime of a login session in hours.
pub const SESSION_TTL_HOURS: i64 = 24;
