//! Error types shared by the server handlers and the prefetcher.

use std::io;
use std::path::PathBuf;

/// Filesystem failure while mutating the asset root
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove {}: {source}", path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },
}

/// Failure during a prefetch run
#[derive(Debug, thiserror::Error)]
pub enum PrefetchError {
    #[error("cannot open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        source: rusqlite::Error,
    },

    #[error("failed to read infografis rows: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP Error {status}")]
    Status { status: u16 },

    #[error(transparent)]
    Storage(#[from] StorageError),
}
