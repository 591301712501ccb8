//! Account balances.

use crate::error::TokenError;
use fungible_store::StoreError;
use fungible_types::{AccountId, TokenAmount};
use std::collections::BTreeMap;

/// Account → balance mapping.
///
/// Zero balances are not stored, so an account that was never credited and
/// one that was drained look the same. Mutation is crate-private: only the
/// ledger engine may credit or debit, which keeps the total-supply
/// bookkeeping in one place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccountStore {
    balances: BTreeMap<AccountId, TokenAmount>,
}

impl AccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current balance; zero for unknown accounts.
    pub fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.balances
            .get(account)
            .cloned()
            .unwrap_or_else(TokenAmount::zero)
    }

    /// Accounts holding a non-zero balance, in identifier order.
    pub fn holders(&self) -> impl Iterator<Item = (&AccountId, &TokenAmount)> {
        self.balances.iter()
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Sum of every balance, or `None` if it does not fit in 256 bits.
    pub fn sum(&self) -> Option<TokenAmount> {
        self.balances
            .values()
            .try_fold(TokenAmount::zero(), |acc, b| acc.checked_add(b))
    }

    /// Fail with `InsufficientBalance` unless `account` holds at least `amount`.
    pub(crate) fn require_balance(
        &self,
        account: &AccountId,
        amount: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let available = self.balance_of(account);
        if available < *amount {
            return Err(TokenError::InsufficientBalance {
                needed: amount.clone(),
                available,
            });
        }
        Ok(available)
    }

    /// Add `amount` to `account`, returning the new balance.
    pub(crate) fn credit(
        &mut self,
        account: &AccountId,
        amount: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let updated = self
            .balance_of(account)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.write(account, updated.clone());
        Ok(updated)
    }

    /// Remove `amount` from `account`, returning the new balance.
    pub(crate) fn debit(
        &mut self,
        account: &AccountId,
        amount: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let available = self.require_balance(account, amount)?;
        let updated = available.saturating_sub(amount);
        self.write(account, updated.clone());
        Ok(updated)
    }

    /// Debit `from` and credit `to` as one step: both new balances are
    /// computed before either is written.
    pub(crate) fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: &TokenAmount,
    ) -> Result<(), TokenError> {
        let from_balance = self.require_balance(from, amount)?;
        if from == to {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.write(from, from_balance.saturating_sub(amount));
        self.write(to, to_balance);
        Ok(())
    }

    /// Rebuild from stored rows. The null identifier never holds tokens.
    pub(crate) fn restore(
        entries: impl IntoIterator<Item = (AccountId, TokenAmount)>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for (account, amount) in entries {
            if account.is_null() && !amount.is_zero() {
                return Err(StoreError::Corruption(format!("null identifier holds {amount}")));
            }
            store.write(&account, amount);
        }
        Ok(store)
    }

    fn write(&mut self, account: &AccountId, amount: TokenAmount) {
        if amount.is_zero() {
            self.balances.remove(account);
        } else {
            self.balances.insert(*account, amount);
        }
    }
}
