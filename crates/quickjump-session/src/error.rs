//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Storage error: {0}")]
    Storage(#[from] quickjump_storage::StorageError),

    #[error("Snapshot has no tabs")]
    EmptySnapshot,

    #[error("Cannot stash a tab without a URL")]
    MissingUrl,
}
