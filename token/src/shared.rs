//! A ledger behind one lock, for hosts that serve calls from many threads.
//!
//! Conservation spans balances, allowances and supply together, so the
//! whole ledger is a single critical section: one call runs at a time and
//! every read sees only fully committed state.

use crate::call::Call;
use crate::engine::TokenLedger;
use crate::error::TokenError;
use crate::events::Receipt;
use fungible_types::{AccountId, Timestamp, TokenAmount};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone, Debug)]
pub struct SharedLedger {
    inner: Arc<Mutex<TokenLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: TokenLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, TokenLedger> {
        // Operations never panic halfway through a write, so a poisoned
        // lock still guards a consistent ledger.
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run `f` with exclusive access to the ledger.
    pub fn with<R>(&self, f: impl FnOnce(&mut TokenLedger) -> R) -> R {
        f(&mut *self.lock())
    }

    pub fn execute(&self, caller: AccountId, call: Call, now: Timestamp) -> Result<Receipt, TokenError> {
        self.lock().execute(caller, call, now)
    }

    pub fn balance_of(&self, account: &AccountId) -> TokenAmount {
        self.lock().balance_of(account)
    }

    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> TokenAmount {
        self.lock().allowance(owner, spender)
    }

    pub fn total_supply(&self) -> TokenAmount {
        self.lock().total_supply().clone()
    }

    /// A point-in-time copy of the whole ledger.
    pub fn snapshot(&self) -> TokenLedger {
        self.lock().clone()
    }
}
