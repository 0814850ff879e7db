//! Typed view over one collection of a backend.

use crate::{DocumentBackend, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// A named collection of JSON documents of type `T`.
pub struct Collection<T> {
    backend: Arc<dyn DocumentBackend>,
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            name: self.name,
            _marker: PhantomData,
        }
    }
}

impl<T> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection").field("name", &self.name).finish()
    }
}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a typed handle on `name` in `backend`.
    pub fn new(backend: Arc<dyn DocumentBackend>, name: &'static str) -> Self {
        Self {
            backend,
            name,
            _marker: PhantomData,
        }
    }

    /// Returns the collection name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Inserts or replaces a document.
    pub fn insert(&self, key: &str, document: &T) -> Result<()> {
        let bytes = serde_json::to_vec(document)?;
        self.backend.put(self.name, key, &bytes)
    }

    /// Reads a document.
    pub fn get(&self, key: &str) -> Result<Option<T>> {
        match self.backend.get(self.name, key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Removes a document, returning whether it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        self.backend.delete(self.name, key)
    }

    /// Reads every document in the collection.
    pub fn all(&self) -> Result<Vec<T>> {
        self.backend
            .list(self.name)?
            .iter()
            .map(|bytes| serde_json::from_slice(bytes).map_err(Into::into))
            .collect()
    }

    /// Returns the number of documents.
    pub fn len(&self) -> Result<usize> {
        self.backend.count(self.name)
    }

    /// Returns true if the collection holds no documents.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
