use sketch_blobs::BlobError;
use sketch_store::StoreError;

/// Error taxonomy for core operations.
///
/// Delivery handlers map these onto transport status codes; nothing
/// HTTP-specific leaks in here. Store failures are wrapped with the
/// operation and the id they concerned.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    Invalid(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("metadata store failed during {op} for '{id}': {source}")]
    Metadata {
        op: &'static str,
        id: String,
        #[source]
        source: StoreError,
    },

    #[error("blob store failed during {op} for '{id}': {source}")]
    Blob {
        op: &'static str,
        id: String,
        #[source]
        source: BlobError,
    },

    #[error("internal error: {0}")]
    Internal(String),
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;

impl CoreError {
    /// Wraps a metadata-store failure, promoting the typed cases.
    pub(crate) fn from_store(op: &'static str, id: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound => CoreError::NotFound {
                entity: "file",
                id: id.to_owned(),
            },
            StoreError::Conflict => CoreError::Conflict(format!("duplicate id: {id}")),
            other => CoreError::Metadata {
                op,
                id: id.to_owned(),
                source: other,
            },
        }
    }

    /// Wraps a blob-store failure with operation context.
    pub(crate) fn from_blob(op: &'static str, id: &str, err: BlobError) -> Self {
        match err {
            BlobError::NotFound(key) => CoreError::NotFound {
                entity: "content",
                id: key,
            },
            other => CoreError::Blob {
                op,
                id: id.to_owned(),
                source: other,
            },
        }
    }
}
