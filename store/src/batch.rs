//! Grouped writes across every store.

use crate::{ApprovalEntry, ApprovalStore, BalanceStore, EventLogStore, MetaStore, StoreError};
use fungible_types::{AccountId, EventRecord, TokenAmount};

/// One write in a [`WriteBatch`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WriteOp {
    PutBalance(AccountId, TokenAmount),
    DeleteBalance(AccountId),
    PutApproval(ApprovalEntry),
    DeleteApproval { owner: AccountId, spender: AccountId },
    PutMeta { key: String, value: Vec<u8> },
    AppendEvent(EventRecord),
}

/// An ordered list of writes meant to land together.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, op: WriteOp) {
        self.ops.push(op);
    }

    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Events appended by this batch, in order.
    pub fn appended_events(&self) -> impl Iterator<Item = &EventRecord> {
        self.ops.iter().filter_map(|op| match op {
            WriteOp::AppendEvent(record) => Some(record),
            _ => None,
        })
    }
}

impl IntoIterator for WriteBatch {
    type Item = WriteOp;
    type IntoIter = std::vec::IntoIter<WriteOp>;

    fn into_iter(self) -> Self::IntoIter {
        self.ops.into_iter()
    }
}

/// Applies a [`WriteBatch`].
///
/// The provided method writes op by op through the per-store traits, so a
/// failure partway leaves earlier ops applied. Backends with transactions
/// should override it so the whole batch commits or none of it does.
pub trait BatchStore: BalanceStore + ApprovalStore + MetaStore + EventLogStore {
    fn apply_batch(&self, batch: WriteBatch) -> Result<(), StoreError> {
        for op in batch {
            match op {
                WriteOp::PutBalance(account, amount) => self.put_balance(&account, &amount)?,
                WriteOp::DeleteBalance(account) => self.delete_balance(&account)?,
                WriteOp::PutApproval(entry) => self.put_approval(&entry)?,
                WriteOp::DeleteApproval { owner, spender } => {
                    self.delete_approval(&owner, &spender)?
                }
                WriteOp::PutMeta { key, value } => self.put_meta(&key, &value)?,
                WriteOp::AppendEvent(record) => self.append_event(&record)?,
            }
        }
        Ok(())
    }
}
