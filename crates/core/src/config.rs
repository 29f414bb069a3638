//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into
//! core services. No process-wide environment variables are read during
//! request handling; that keeps behaviour consistent across multi-threaded
//! runtimes and test harnesses.

use crate::constants::{BLOBS_DIR_NAME, DATABASE_FILENAME, SESSION_TTL_HOURS};
use crate::{CoreError, CoreResult};
use chrono::Duration;
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    seed_document_path: Option<PathBuf>,
    session_ttl: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `data_dir` is created when missing; the database and blob root both
    /// live underneath it. `seed_document_path`, when set, must point at a
    /// readable file used to materialize the seed document's content.
    pub fn new(data_dir: PathBuf, seed_document_path: Option<PathBuf>) -> CoreResult<Self> {
        if data_dir.as_os_str().is_empty() {
            return Err(CoreError::Invalid("data directory cannot be empty".into()));
        }

        std::fs::create_dir_all(&data_dir).map_err(|e| {
            CoreError::Internal(format!(
                "cannot create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        if let Some(seed) = &seed_document_path {
            if !seed.is_file() {
                return Err(CoreError::Invalid(format!(
                    "seed document path is not a file: {}",
                    seed.display()
                )));
            }
        }

        Ok(Self {
            data_dir,
            seed_document_path,
            session_ttl: Duration::hours(SESSION_TTL_HOURS),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the SQLite metadata database.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(DATABASE_FILENAME)
    }

    /// Root directory of the filesystem blob store.
    pub fn blobs_dir(&self) -> PathBuf {
        self.data_dir.join(BLOBS_DIR_NAME)
    }

    pub fn seed_document_path(&self) -> Option<&Path> {
        self.seed_document_path.as_deref()
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }
}
