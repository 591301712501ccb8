//! Fungible-token ledger.
//!
//! Tracks per-account balances and owner → spender allowances and exposes
//! transfer / approve / transferFrom / increase- and decreaseAllowance /
//! mint / burn / burnFrom under two invariants:
//!
//! - the sum of all balances always equals the total supply;
//! - no balance or allowance ever leaves `[0, 2^256 - 1]`.
//!
//! Every operation is all-or-nothing. A rejected call leaves the ledger
//! untouched and emits nothing; an accepted call returns a [`Receipt`] with
//! the events it appended to the ledger's [`EventLog`].

pub mod accounts;
pub mod allowances;
pub mod call;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod metadata;
pub mod persist;
pub mod policy;
pub mod shared;

pub use accounts::AccountStore;
pub use allowances::{AllowanceStore, UNLIMITED_ALLOWANCE};
pub use call::Call;
pub use config::{FaucetSettings, LedgerConfig};
pub use engine::TokenLedger;
pub use error::TokenError;
pub use events::{EventLog, Receipt};
pub use metadata::TokenMetadata;
pub use policy::{Faucet, FaucetConfig, MintPolicy};
pub use shared::SharedLedger;
