//! Ledger errors.
//!
//! Each variant is a distinct failure kind; callers match on the variant, not
//! on the message.

use fungible_store::StoreError;
use fungible_types::{AccountId, Timestamp, TokenAmount};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("target is the null identifier")]
    ZeroAddressTarget,

    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("insufficient allowance: need {needed}, allowed {available}")]
    InsufficientAllowance {
        needed: TokenAmount,
        available: TokenAmount,
    },

    #[error("decreased allowance below zero: current {current}, decrease {delta}")]
    AllowanceUnderflow {
        current: TokenAmount,
        delta: TokenAmount,
    },

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("{caller} is not authorized to {action}")]
    Unauthorized {
        caller: AccountId,
        action: &'static str,
    },

    #[error("faucet is disabled")]
    FaucetDisabled,

    #[error("faucet already claimed, next claim at {retry_at}")]
    FaucetCooldown { retry_at: Timestamp },

    #[error("balances sum to {balances} but total supply is {supply}")]
    ConservationViolated {
        balances: TokenAmount,
        supply: TokenAmount,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}
