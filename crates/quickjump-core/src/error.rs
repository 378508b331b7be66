//! Core error types

use thiserror::Error;

use quickjump_session::TabId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] quickjump_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] quickjump_session::SessionError),

    #[error("Query error: {0}")]
    Query(#[from] quickjump_query::QueryError),

    #[error("Browser error: {0}")]
    Source(#[from] SourceError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure reported by a browser-side collaborator
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("{source_name} unavailable: {reason}")]
    Unavailable {
        source_name: &'static str,
        reason: String,
    },

    #[error("Tab not found: {0}")]
    TabNotFound(TabId),

    #[error("Restricted page: {0}")]
    Restricted(String),
}

impl SourceError {
    pub fn unavailable(source_name: &'static str, reason: impl Into<String>) -> Self {
        SourceError::Unavailable {
            source_name,
            reason: reason.into(),
        }
    }
}
