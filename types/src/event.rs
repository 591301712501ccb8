//! Ledger notifications.

use crate::address::AccountId;
use crate::amount::TokenAmount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A notification emitted by a successful ledger operation.
///
/// Field order is part of the contract: `Transfer(from, to, value)` and
/// `Approval(owner, spender, value)`. Mints come from [`AccountId::NULL`],
/// burns go to it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenEvent {
    Transfer {
        from: AccountId,
        to: AccountId,
        value: TokenAmount,
    },
    Approval {
        owner: AccountId,
        spender: AccountId,
        value: TokenAmount,
    },
}

impl TokenEvent {
    pub fn name(&self) -> &'static str {
        match self {
            TokenEvent::Transfer { .. } => "Transfer",
            TokenEvent::Approval { .. } => "Approval",
        }
    }

    /// Whether `account` appears in any position of this event.
    pub fn involves(&self, account: &AccountId) -> bool {
        match self {
            TokenEvent::Transfer { from, to, .. } => from == account || to == account,
            TokenEvent::Approval { owner, spender, .. } => owner == account || spender == account,
        }
    }

    pub fn value(&self) -> &TokenAmount {
        match self {
            TokenEvent::Transfer { value, .. } | TokenEvent::Approval { value, .. } => value,
        }
    }
}

impl fmt::Display for TokenEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenEvent::Transfer { from, to, value } => {
                write!(f, "Transfer({from}, {to}, {value})")
            }
            TokenEvent::Approval {
                owner,
                spender,
                value,
            } => write!(f, "Approval({owner}, {spender}, {value})"),
        }
    }
}

/// An event together with its position in the ledger's log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Zero-based, gapless, strictly increasing.
    pub seq: u64,
    pub event: TokenEvent,
}
