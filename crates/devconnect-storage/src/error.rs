//! Storage error types.

use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The connection string names a backend that is not available.
    #[error("unsupported storage backend: {0}")]
    UnsupportedBackend(String),

    /// The collection is not known to the backend.
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    /// The underlying database reported an error.
    #[error("backend error: {0}")]
    Backend(String),
}

/// A specialized Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
