//! Abstract storage traits for the fungible-token ledger.
//!
//! The host environment owns durable storage. Every backend (an embedding
//! runtime's key-value space, a database, in-memory for testing) implements
//! these traits; the ledger depends only on the traits.

pub mod allowance;
pub mod balance;
pub mod batch;
pub mod error;
pub mod event;
pub mod meta;

pub use allowance::{ApprovalEntry, ApprovalStore};
pub use balance::BalanceStore;
pub use batch::{BatchStore, WriteBatch, WriteOp};
pub use error::StoreError;
pub use event::EventLogStore;
pub use meta::MetaStore;

/// Everything a ledger needs to persist itself.
pub trait TokenStore: BatchStore {}

impl<T> TokenStore for T where T: BatchStore {}
