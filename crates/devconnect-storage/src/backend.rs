//! Storage backend implementations.

use crate::Result;
use bytes::Bytes;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// A trait for document storage backends.
///
/// Documents are addressed by `(collection, key)`. Implementations must be
/// safe to share between request handlers.
pub trait DocumentBackend: Send + Sync {
    /// Stores a document, replacing any previous value under the same key.
    fn put(&self, collection: &str, key: &str, document: &[u8]) -> Result<()>;

    /// Reads a document.
    fn get(&self, collection: &str, key: &str) -> Result<Option<Bytes>>;

    /// Deletes a document, returning whether it existed.
    fn delete(&self, collection: &str, key: &str) -> Result<bool>;

    /// Returns every document in a collection, ordered by key.
    fn list(&self, collection: &str) -> Result<Vec<Bytes>>;

    /// Returns the number of documents in a collection.
    fn count(&self, collection: &str) -> Result<usize> {
        Ok(self.list(collection)?.len())
    }

    /// Flush any pending writes to durable storage.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

impl<T: DocumentBackend + ?Sized> DocumentBackend for Arc<T> {
    fn put(&self, collection: &str, key: &str, document: &[u8]) -> Result<()> {
        (**self).put(collection, key, document)
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Bytes>> {
        (**self).get(collection, key)
    }

    fn delete(&self, collection: &str, key: &str) -> Result<bool> {
        (**self).delete(collection, key)
    }

    fn list(&self, collection: &str) -> Result<Vec<Bytes>> {
        (**self).list(collection)
    }

    fn count(&self, collection: &str) -> Result<usize> {
        (**self).count(collection)
    }

    fn flush(&self) -> Result<()> {
        (**self).flush()
    }
}

/// An in-memory document backend.
#[derive(Default)]
pub struct MemoryBackend {
    collections: RwLock<HashMap<String, BTreeMap<String, Bytes>>>,
}

impl MemoryBackend {
    /// Creates a new in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentBackend for MemoryBackend {
    fn put(&self, collection: &str, key: &str, document: &[u8]) -> Result<()> {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), Bytes::copy_from_slice(document));
        Ok(())
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Bytes>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .and_then(|docs| docs.get(key))
            .cloned())
    }

    fn delete(&self, collection: &str, key: &str) -> Result<bool> {
        Ok(self
            .collections
            .write()
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(key).is_some()))
    }

    fn list(&self, collection: &str) -> Result<Vec<Bytes>> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map(|docs| docs.values().cloned().collect())
            .unwrap_or_default())
    }

    fn count(&self, collection: &str) -> Result<usize> {
        Ok(self
            .collections
            .read()
            .get(collection)
            .map_or(0, BTreeMap::len))
    }
}
