//! Nullable store: thread-safe in-memory accrual storage for testing.

use accrue_store::{AccrualStore, StoreError};
use accrue_types::HolderAddress;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

/// An in-memory accrual store for testing.
pub struct NullAccrualStore {
    holders: Mutex<HashMap<HolderAddress, Vec<u8>>>,
    meta: Mutex<HashMap<Vec<u8>, Vec<u8>>>,
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    m.lock()
        .map_err(|e| StoreError::Backend(format!("lock poisoned: {e}")))
}

impl NullAccrualStore {
    pub fn new() -> Self {
        Self {
            holders: Mutex::new(HashMap::new()),
            meta: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for NullAccrualStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AccrualStore for NullAccrualStore {
    fn put_holder_record(&self, holder: &HolderAddress, record: &[u8]) -> Result<(), StoreError> {
        lock(&self.holders)?.insert(holder.clone(), record.to_vec());
        Ok(())
    }

    fn iter_holder_records(&self) -> Result<Vec<(HolderAddress, Vec<u8>)>, StoreError> {
        Ok(lock(&self.holders)?
            .iter()
            .map(|(h, r)| (h.clone(), r.clone()))
            .collect())
    }

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.meta)?.get(key).cloned())
    }

    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        lock(&self.meta)?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
