//! Owner → spender allowances.

use crate::error::TokenError;
use fungible_store::StoreError;
use fungible_types::{AccountId, TokenAmount};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// An allowance equal to the largest representable amount is unlimited:
/// spending against it never decrements it.
pub static UNLIMITED_ALLOWANCE: LazyLock<TokenAmount> = LazyLock::new(TokenAmount::max);

/// (owner, spender) → amount the spender may still move out of the owner's
/// balance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AllowanceStore {
    allowances: BTreeMap<(AccountId, AccountId), TokenAmount>,
}

impl AllowanceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current allowance; zero when never granted.
    pub fn allowance_of(&self, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        self.allowances
            .get(&(*owner, *spender))
            .cloned()
            .unwrap_or_else(TokenAmount::zero)
    }

    /// Every non-zero allowance as `(owner, spender, amount)`.
    pub fn grants(&self) -> impl Iterator<Item = (&AccountId, &AccountId, &TokenAmount)> {
        self.allowances
            .iter()
            .map(|((owner, spender), amount)| (owner, spender, amount))
    }

    /// Non-zero allowances granted by `owner`.
    pub fn grants_by<'a>(
        &'a self,
        owner: &'a AccountId,
    ) -> impl Iterator<Item = (&'a AccountId, &'a TokenAmount)> + 'a {
        self.allowances
            .iter()
            .filter(move |((o, _), _)| o == owner)
            .map(|((_, spender), amount)| (spender, amount))
    }

    pub fn len(&self) -> usize {
        self.allowances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowances.is_empty()
    }

    pub(crate) fn set_allowance(&mut self, owner: &AccountId, spender: &AccountId, amount: TokenAmount) {
        if amount.is_zero() {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
    }

    /// Fail with `InsufficientAllowance` unless `spender` may move `amount`.
    pub(crate) fn require_allowance(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let available = self.allowance_of(owner, spender);
        if available < *amount {
            return Err(TokenError::InsufficientAllowance {
                needed: amount.clone(),
                available,
            });
        }
        Ok(available)
    }

    /// Spend `amount` of the allowance. An unlimited allowance is left as is.
    pub(crate) fn consume(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        amount: &TokenAmount,
    ) -> Result<(), TokenError> {
        let available = self.require_allowance(owner, spender, amount)?;
        if available == *UNLIMITED_ALLOWANCE {
            return Ok(());
        }
        self.set_allowance(owner, spender, available.saturating_sub(amount));
        Ok(())
    }

    /// Raise the allowance by `delta`, returning the new total.
    pub(crate) fn increase(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        delta: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let updated = self
            .allowance_of(owner, spender)
            .checked_add(delta)
            .ok_or(TokenError::ArithmeticOverflow)?;
        self.set_allowance(owner, spender, updated.clone());
        Ok(updated)
    }

    /// Lower the allowance by `delta`, returning the new total.
    pub(crate) fn decrease(
        &mut self,
        owner: &AccountId,
        spender: &AccountId,
        delta: &TokenAmount,
    ) -> Result<TokenAmount, TokenError> {
        let current = self.allowance_of(owner, spender);
        let updated = current
            .checked_sub(delta)
            .ok_or_else(|| TokenError::AllowanceUnderflow {
                current: current.clone(),
                delta: delta.clone(),
            })?;
        self.set_allowance(owner, spender, updated.clone());
        Ok(updated)
    }

    /// Rebuild from stored rows. The null identifier is never a grantee.
    pub(crate) fn restore(
        entries: impl IntoIterator<Item = (AccountId, AccountId, TokenAmount)>,
    ) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for (owner, spender, amount) in entries {
            if spender.is_null() && !amount.is_zero() {
                return Err(StoreError::Corruption(format!(
                    "allowance of {amount} from {owner} to the null identifier"
                )));
            }
            store.set_allowance(&owner, &spender, amount);
        }
        Ok(store)
    }
}
