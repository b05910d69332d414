use std::sync::Arc;

use rocksdb::{Options, DB};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::LedgerResult;
use crate::types::Bytes32;

/// Persistent slot store backed by RocksDB.
///
/// Every entity lives in one slot keyed by a 32-byte derived address; the
/// host runtime serializes conflicting writes to the same slot, so no
/// in-process locking happens here. Payloads are bincode-encoded records.
pub struct Storage {
    db: Arc<DB>,
}

impl Storage {
    pub fn open(path: &str) -> LedgerResult<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path)?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Load and decode the entity at `addr`, if the slot is occupied.
    pub fn get<T: DeserializeOwned>(&self, addr: &Bytes32) -> LedgerResult<Option<T>> {
        match self.db.get(addr)? {
            Some(raw) => Ok(Some(bincode::deserialize(&raw)?)),
            None => Ok(None),
        }
    }

    /// Encode and store an entity at `addr`, overwriting any previous value.
    pub fn put<T: Serialize>(&self, addr: &Bytes32, value: &T) -> LedgerResult<()> {
        let raw = bincode::serialize(value)?;
        self.db.put(addr, raw)?;
        Ok(())
    }

    /// Whether the slot at `addr` is occupied.
    pub fn contains(&self, addr: &Bytes32) -> LedgerResult<bool> {
        Ok(self.db.get(addr)?.is_some())
    }
}
