//! Document storage for DevConnect.
//!
//! Documents are serialized as JSON and grouped into named collections.
//! A [`DocumentBackend`] only knows about opaque bytes; [`Collection`] adds
//! the typed view the domain stores work with.
//!
//! Backends are selected from a connection string with [`open`]:
//!
//! - `memory://` keeps everything in process memory
//! - `rocksdb://<path>` persists to a RocksDB directory (feature `rocksdb-backend`)

mod backend;
mod collection;
mod error;
#[cfg(feature = "rocksdb-backend")]
mod rocks;

pub use backend::{DocumentBackend, MemoryBackend};
pub use collection::Collection;
pub use error::{Result, StorageError};
#[cfg(feature = "rocksdb-backend")]
pub use rocks::RocksDbBackend;

use std::sync::Arc;

/// Names of every collection the application writes to.
pub const COLLECTIONS: &[&str] = &["users", "user_emails", "profiles", "posts"];

/// Opens the backend named by a connection string.
pub fn open(url: &str) -> Result<Arc<dyn DocumentBackend>> {
    match url.split_once("://") {
        Some(("memory", _)) => {
            tracing::info!("Using in-memory document store");
            Ok(Arc::new(MemoryBackend::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        Some(("rocksdb", path)) if !path.is_empty() => {
            tracing::info!(path = %path, "Opening RocksDB document store");
            Ok(Arc::new(RocksDbBackend::open(path)?))
        }
        _ => Err(StorageError::UnsupportedBackend(url.to_string())),
    }
}
