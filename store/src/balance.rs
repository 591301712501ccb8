//! Balance storage trait.

use crate::StoreError;
use fungible_types::{AccountId, TokenAmount};

/// Durable account → balance mapping.
///
/// Accounts with a zero balance need not be stored; a missing entry reads
/// as zero at the ledger layer.
pub trait BalanceStore {
    fn get_balance(&self, account: &AccountId) -> Result<Option<TokenAmount>, StoreError>;
    fn put_balance(&self, account: &AccountId, amount: &TokenAmount) -> Result<(), StoreError>;
    fn delete_balance(&self, account: &AccountId) -> Result<(), StoreError>;
    fn iter_balances(&self) -> Result<Vec<(AccountId, TokenAmount)>, StoreError>;

    fn balance_count(&self) -> Result<u64, StoreError> {
        self.iter_balances().map(|v| v.len() as u64)
    }
}
