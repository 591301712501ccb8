//! Approval (allowance) storage trait.

use crate::StoreError;
use fungible_types::{AccountId, TokenAmount};
use serde::{Deserialize, Serialize};

/// One stored allowance.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApprovalEntry {
    pub owner: AccountId,
    pub spender: AccountId,
    pub amount: TokenAmount,
}

/// Durable (owner, spender) → allowance mapping.
pub trait ApprovalStore {
    fn get_approval(
        &self,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<Option<TokenAmount>, StoreError>;

    fn put_approval(&self, entry: &ApprovalEntry) -> Result<(), StoreError>;

    fn delete_approval(&self, owner: &AccountId, spender: &AccountId) -> Result<(), StoreError>;

    fn iter_approvals(&self) -> Result<Vec<ApprovalEntry>, StoreError>;

    /// All allowances granted by `owner`.
    fn iter_approvals_by_owner(&self, owner: &AccountId) -> Result<Vec<ApprovalEntry>, StoreError> {
        Ok(self
            .iter_approvals()?
            .into_iter()
            .filter(|e| e.owner == *owner)
            .collect())
    }
}
