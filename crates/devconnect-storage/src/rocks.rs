//! RocksDB persistent storage backend.
//!
//! Each collection lives in its own column family; keys are the document
//! keys and values the JSON bytes.

use crate::{DocumentBackend, Result, StorageError, COLLECTIONS};
use bytes::Bytes;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, DB};
use std::path::Path;

/// RocksDB persistent storage.
pub struct RocksDbBackend {
    db: DB,
}

impl RocksDbBackend {
    /// Opens or creates a RocksDB database with one column family per collection.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let cfs = COLLECTIONS
            .iter()
            .map(|name| ColumnFamilyDescriptor::new(*name, opts.clone()))
            .collect::<Vec<_>>();

        let db = DB::open_cf_descriptors(&opts, path, cfs).map_err(backend_error)?;

        Ok(Self { db })
    }

    fn cf(&self, collection: &str) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(collection)
            .ok_or_else(|| StorageError::UnknownCollection(collection.to_string()))
    }
}

fn backend_error(e: rocksdb::Error) -> StorageError {
    StorageError::Backend(e.to_string())
}

impl DocumentBackend for RocksDbBackend {
    fn put(&self, collection: &str, key: &str, document: &[u8]) -> Result<()> {
        self.db
            .put_cf(self.cf(collection)?, key.as_bytes(), document)
            .map_err(backend_error)
    }

    fn get(&self, collection: &str, key: &str) -> Result<Option<Bytes>> {
        Ok(self
            .db
            .get_cf(self.cf(collection)?, key.as_bytes())
            .map_err(backend_error)?
            .map(Bytes::from))
    }

    fn delete(&self, collection: &str, key: &str) -> Result<bool> {
        let cf = self.cf(collection)?;
        let existed = self
            .db
            .get_pinned_cf(cf, key.as_bytes())
            .map_err(backend_error)?
            .is_some();

        self.db
            .delete_cf(cf, key.as_bytes())
            .map_err(backend_error)?;

        Ok(existed)
    }

    fn list(&self, collection: &str) -> Result<Vec<Bytes>> {
        self.db
            .iterator_cf(self.cf(collection)?, IteratorMode::Start)
            .map(|item| {
                item.map(|(_, value)| Bytes::from(value.into_vec()))
                    .map_err(backend_error)
            })
            .collect()
    }

    fn flush(&self) -> Result<()> {
        self.db.flush().map_err(backend_error)
    }
}
