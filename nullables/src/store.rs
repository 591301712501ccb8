//! Nullable store: thread-safe in-memory storage for testing.

use fungible_store::{
    ApprovalEntry, ApprovalStore, BalanceStore, BatchStore, EventLogStore, MetaStore, StoreError,
    WriteBatch, WriteOp,
};
use fungible_types::{AccountId, EventRecord, TokenAmount};
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// An in-memory implementation of every ledger storage trait.
///
/// Balances and approvals are kept ordered so iteration is deterministic.
/// Batches apply all-or-nothing.
#[derive(Debug, Default)]
pub struct NullStore {
    balances: Mutex<BTreeMap<AccountId, TokenAmount>>,
    approvals: Mutex<BTreeMap<(AccountId, AccountId), TokenAmount>>,
    meta: Mutex<HashMap<String, Vec<u8>>>,
    events: Mutex<Vec<EventRecord>>,
    fail_writes: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    m.lock()
        .map_err(|_| StoreError::Backend("null store lock poisoned".to_string()))
}

impl NullStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail with [`StoreError::Backend`].
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("null store writes disabled".to_string()));
        }
        Ok(())
    }

    /// Drop the newest `n` events, leaving the rest in place.
    pub fn truncate_events(&self, n: usize) -> Result<(), StoreError> {
        let mut events = lock(&self.events)?;
        let keep = events.len().saturating_sub(n);
        events.truncate(keep);
        Ok(())
    }

    /// Remove a single event, opening a gap in the log.
    pub fn remove_event(&self, seq: u64) -> Result<(), StoreError> {
        let mut events = lock(&self.events)?;
        events.retain(|r| r.seq != seq);
        Ok(())
    }
}

impl BalanceStore for NullStore {
    fn get_balance(&self, account: &AccountId) -> Result<Option<TokenAmount>, StoreError> {
        Ok(lock(&self.balances)?.get(account).cloned())
    }

    fn put_balance(&self, account: &AccountId, amount: &TokenAmount) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.balances)?.insert(*account, amount.clone());
        Ok(())
    }

    fn delete_balance(&self, account: &AccountId) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.balances)?.remove(account);
        Ok(())
    }

    fn iter_balances(&self) -> Result<Vec<(AccountId, TokenAmount)>, StoreError> {
        Ok(lock(&self.balances)?
            .iter()
            .map(|(account, amount)| (*account, amount.clone()))
            .collect())
    }
}

impl ApprovalStore for NullStore {
    fn get_approval(
        &self,
        owner: &AccountId,
        spender: &AccountId,
    ) -> Result<Option<TokenAmount>, StoreError> {
        Ok(lock(&self.approvals)?.get(&(*owner, *spender)).cloned())
    }

    fn put_approval(&self, entry: &ApprovalEntry) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.approvals)?.insert((entry.owner, entry.spender), entry.amount.clone());
        Ok(())
    }

    fn delete_approval(&self, owner: &AccountId, spender: &AccountId) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.approvals)?.remove(&(*owner, *spender));
        Ok(())
    }

    fn iter_approvals(&self) -> Result<Vec<ApprovalEntry>, StoreError> {
        Ok(lock(&self.approvals)?
            .iter()
            .map(|((owner, spender), amount)| ApprovalEntry {
                owner: *owner,
                spender: *spender,
                amount: amount.clone(),
            })
            .collect())
    }
}

impl MetaStore for NullStore {
    fn put_meta(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.meta)?.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get_meta(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(lock(&self.meta)?.get(key).cloned())
    }

    fn delete_meta(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        lock(&self.meta)?.remove(key);
        Ok(())
    }
}

impl EventLogStore for NullStore {
    fn append_event(&self, record: &EventRecord) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut events = lock(&self.events)?;
        let expected = events.len() as u64;
        if record.seq != expected {
            return Err(StoreError::Backend(format!(
                "event seq {} appended, expected {expected}",
                record.seq
            )));
        }
        events.push(record.clone());
        Ok(())
    }

    fn event_count(&self) -> Result<u64, StoreError> {
        Ok(lock(&self.events)?.len() as u64)
    }

    fn iter_events_from(&self, from: u64) -> Result<Vec<EventRecord>, StoreError> {
        Ok(lock(&self.events)?
            .iter()
            .filter(|r| r.seq >= from)
            .cloned()
            .collect())
    }
}

impl BatchStore for NullStore {
    fn apply_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        self.check_writable()?;
        let mut balances = lock(&self.balances)?;
        let mut approvals = lock(&self.approvals)?;
        let mut meta = lock(&self.meta)?;
        let mut events = lock(&self.events)?;

        // The only op that can fail is an out-of-order append; check them
        // all before touching anything.
        let mut expected = events.len() as u64;
        for record in batch.appended_events() {
            if record.seq != expected {
                return Err(StoreError::Backend(format!(
                    "event seq {} appended, expected {expected}",
                    record.seq
                )));
            }
            expected += 1;
        }

        for op in batch {
            match op {
                WriteOp::PutBalance(account, amount) => {
                    balances.insert(account, amount);
                }
                WriteOp::DeleteBalance(account) => {
                    balances.remove(&account);
                }
                WriteOp::PutApproval(entry) => {
                    approvals.insert((entry.owner, entry.spender), entry.amount);
                }
                WriteOp::DeleteApproval { owner, spender } => {
                    approvals.remove(&(owner, spender));
                }
                WriteOp::PutMeta { key, value } => {
                    meta.insert(key, value);
                }
                WriteOp::AppendEvent(record) => events.push(record),
            }
        }
        Ok(())
    }
}
