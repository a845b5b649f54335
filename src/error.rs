//! Error types for the user directory service.

use thiserror::Error;

/// Failure originating from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database connection failed: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("query failed: {0}")]
    Query(#[source] sqlx::Error),
}

/// Failure while loading or applying the user-list template.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to read template '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("template parse error: {0}")]
    Parse(String),
}
