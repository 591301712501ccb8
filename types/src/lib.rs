//! Fundamental types for the fungible-token ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account identifiers, 256-bit token amounts, timestamps, ledger events and
//! human-readable unit scaling.

pub mod address;
pub mod amount;
pub mod error;
pub mod event;
pub mod time;
pub mod units;

pub use address::AccountId;
pub use amount::TokenAmount;
pub use error::TypesError;
pub use event::{EventRecord, TokenEvent};
pub use time::{Clock, SystemClock, Timestamp};
pub use units::{format_units, parse_units};
