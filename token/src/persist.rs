//! Saving and restoring a ledger through the host's storage traits.

use crate::accounts::AccountStore;
use crate::allowances::AllowanceStore;
use crate::engine::TokenLedger;
use crate::error::TokenError;
use crate::events::EventLog;
use crate::metadata::TokenMetadata;
use crate::policy::{Faucet, MintPolicy};
use fungible_store::{ApprovalEntry, StoreError, TokenStore, WriteBatch, WriteOp};
use fungible_types::{AccountId, TokenAmount};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

const META_METADATA: &str = "metadata";
const META_TOTAL_SUPPLY: &str = "total_supply";
const META_ADMIN: &str = "admin";
const META_MINT_POLICY: &str = "mint_policy";
const META_FAUCET: &str = "faucet";
const META_EVENT_COUNT: &str = "event_count";

fn put<T: Serialize>(batch: &mut WriteBatch, key: &str, value: &T) -> Result<(), StoreError> {
    let value = bincode::serialize(value).map_err(|e| StoreError::Serialization(e.to_string()))?;
    batch.push(WriteOp::PutMeta {
        key: key.to_string(),
        value,
    });
    Ok(())
}

fn get<T: DeserializeOwned>(store: &dyn TokenStore, key: &str) -> Result<T, StoreError> {
    let bytes = store
        .get_meta(key)?
        .ok_or_else(|| StoreError::NotFound(key.to_string()))?;
    bincode::deserialize(&bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

impl TokenLedger {
    /// Persist all ledger state as one [`WriteBatch`].
    ///
    /// Stored balances and allowances that have since dropped to zero are
    /// deleted. Events already in the store are not rewritten; only the
    /// tail the store has not seen yet is appended. The store's log must be
    /// a prefix of this ledger's log, otherwise nothing is written and the
    /// save fails with [`StoreError::Corruption`].
    ///
    /// The save is atomic only if the store's
    /// [`BatchStore::apply_batch`](fungible_store::BatchStore::apply_batch)
    /// is.
    pub fn save_to_store(&self, store: &dyn TokenStore) -> Result<(), TokenError> {
        let entries = self.events().entries();
        let stored = usize::try_from(store.event_count()?).unwrap_or(usize::MAX);
        if stored > entries.len() {
            return Err(StoreError::Corruption(format!(
                "store holds {stored} events, ledger only {}",
                entries.len()
            ))
            .into());
        }
        if store.iter_events_from(0)? != entries[..stored] {
            return Err(
                StoreError::Corruption("stored events are not this ledger's history".to_string()).into(),
            );
        }

        let mut batch = WriteBatch::new();
        put(&mut batch, META_METADATA, self.metadata())?;
        put(&mut batch, META_TOTAL_SUPPLY, self.total_supply())?;
        put(&mut batch, META_ADMIN, self.admin())?;
        put(&mut batch, META_MINT_POLICY, &self.mint_policy())?;
        put(&mut batch, META_FAUCET, self.faucet())?;
        put(&mut batch, META_EVENT_COUNT, &(entries.len() as u64))?;

        for (account, _) in store.iter_balances()? {
            if self.accounts().balance_of(&account).is_zero() {
                batch.push(WriteOp::DeleteBalance(account));
            }
        }
        for (account, amount) in self.accounts().holders() {
            batch.push(WriteOp::PutBalance(*account, amount.clone()));
        }

        let live: BTreeSet<(AccountId, AccountId)> = self
            .allowances()
            .grants()
            .map(|(owner, spender, _)| (*owner, *spender))
            .collect();
        for entry in store.iter_approvals()? {
            if !live.contains(&(entry.owner, entry.spender)) {
                batch.push(WriteOp::DeleteApproval {
                    owner: entry.owner,
                    spender: entry.spender,
                });
            }
        }
        for (owner, spender, amount) in self.allowances().grants() {
            batch.push(WriteOp::PutApproval(ApprovalEntry {
                owner: *owner,
                spender: *spender,
                amount: amount.clone(),
            }));
        }

        for record in &entries[stored..] {
            batch.push(WriteOp::AppendEvent(record.clone()));
        }

        let ops = batch.len();
        store.apply_batch(batch)?;
        debug!(
            holders = self.accounts().holder_count(),
            allowances = self.allowances().len(),
            events = entries.len(),
            appended = entries.len() - stored,
            ops,
            "ledger saved"
        );
        Ok(())
    }

    /// Restore a ledger saved with [`TokenLedger::save_to_store`].
    ///
    /// Fails with [`StoreError::Corruption`] if the stored balances do not
    /// add up to the stored supply, the null identifier holds tokens or an
    /// allowance, or the event log has gaps or is shorter than when saved.
    pub fn load_from_store(store: &dyn TokenStore) -> Result<Self, TokenError> {
        let metadata: TokenMetadata = get(store, META_METADATA)?;
        let total_supply: TokenAmount = get(store, META_TOTAL_SUPPLY)?;
        let admin: AccountId = get(store, META_ADMIN)?;
        let mint_policy: MintPolicy = get(store, META_MINT_POLICY)?;
        let faucet: Faucet = get(store, META_FAUCET)?;
        let event_count: u64 = get(store, META_EVENT_COUNT)?;

        let accounts = AccountStore::restore(store.iter_balances()?)?;
        let allowances = AllowanceStore::restore(
            store
                .iter_approvals()?
                .into_iter()
                .map(|e| (e.owner, e.spender, e.amount)),
        )?;
        let log = EventLog::restore(store.iter_events_from(0)?)
            .ok_or_else(|| StoreError::Corruption("event log has gaps".to_string()))?;
        if log.next_seq() != event_count {
            return Err(StoreError::Corruption(format!(
                "event log holds {} events, {event_count} were saved",
                log.len()
            ))
            .into());
        }

        let ledger = Self::from_parts(
            metadata,
            accounts,
            allowances,
            total_supply,
            admin,
            mint_policy,
            faucet,
            log,
        );
        ledger
            .audit()
            .map_err(|e| StoreError::Corruption(e.to_string()))?;
        debug!(
            name = ledger.name(),
            supply = %ledger.total_supply(),
            events = ledger.events().len(),
            "ledger loaded"
        );
        Ok(ledger)
    }
}
