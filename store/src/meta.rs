//! Metadata storage trait.

use crate::StoreError;

/// Generic key-value space for ledger bookkeeping that isn't a balance,
/// an allowance or an event: token metadata, total supply, mint policy.
pub trait MetaStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn delete_meta(&self, key: &str) -> Result<(), StoreError>;
}
