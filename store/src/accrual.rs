use crate::StoreError;
use accrue_types::HolderAddress;

/// Store trait for persisting accrual state to durable storage.
///
/// Uses opaque `Vec<u8>` so the store doesn't depend on `accrue-accrual`.
/// The ledger serializes and deserializes its own records: one per holder
/// (locked rate + last update) plus meta keys for the global rate.
pub trait AccrualStore {
    fn put_holder_record(&self, holder: &HolderAddress, record: &[u8]) -> Result<(), StoreError>;
    fn iter_holder_records(&self) -> Result<Vec<(HolderAddress, Vec<u8>)>, StoreError>;

    fn get_meta(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;
    fn put_meta(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
