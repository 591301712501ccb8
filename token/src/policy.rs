//! Who may create new tokens.
//!
//! By default anyone may mint, which is what the classroom token does. A
//! deployment can instead reserve minting for a single administrator, and
//! can run a time-gated faucet that lets each account mint a fixed amount
//! to itself once per interval.

use crate::error::TokenError;
use fungible_types::{AccountId, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One hour between faucet claims.
pub const DEFAULT_FAUCET_INTERVAL_SECS: u64 = 3600;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MintPolicy {
    /// Any caller may mint to any non-null account.
    #[default]
    Open,
    /// Only the ledger administrator may mint.
    AdminOnly,
}

impl MintPolicy {
    pub(crate) fn authorize(&self, caller: &AccountId, admin: &AccountId) -> Result<(), TokenError> {
        match self {
            MintPolicy::Open => Ok(()),
            MintPolicy::AdminOnly if caller == admin => Ok(()),
            MintPolicy::AdminOnly => Err(TokenError::Unauthorized {
                caller: *caller,
                action: "mint",
            }),
        }
    }
}

/// Faucet parameters in raw units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaucetConfig {
    pub amount: TokenAmount,
    pub interval_secs: u64,
}

impl FaucetConfig {
    pub fn new(amount: TokenAmount) -> Self {
        Self {
            amount,
            interval_secs: DEFAULT_FAUCET_INTERVAL_SECS,
        }
    }
}

/// Faucet configuration plus the last claim time of every claimant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faucet {
    config: Option<FaucetConfig>,
    last_claims: BTreeMap<AccountId, Timestamp>,
}

impl Faucet {
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn new(config: FaucetConfig) -> Self {
        Self {
            config: Some(config),
            last_claims: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> Option<&FaucetConfig> {
        self.config.as_ref()
    }

    pub fn last_claim(&self, account: &AccountId) -> Option<Timestamp> {
        self.last_claims.get(account).copied()
    }

    /// Earliest time `account` may claim again; `None` if it has never
    /// claimed or the faucet is off.
    pub fn next_claim_at(&self, account: &AccountId) -> Option<Timestamp> {
        let config = self.config.as_ref()?;
        self.last_claim(account)
            .map(|last| last.plus_secs(config.interval_secs))
    }

    /// The amount `account` would receive by claiming at `now`.
    pub(crate) fn check_claim(&self, account: &AccountId, now: Timestamp) -> Result<TokenAmount, TokenError> {
        let config = self.config.as_ref().ok_or(TokenError::FaucetDisabled)?;
        if let Some(retry_at) = self.next_claim_at(account) {
            if now < retry_at {
                return Err(TokenError::FaucetCooldown { retry_at });
            }
        }
        Ok(config.amount.clone())
    }

    pub(crate) fn record_claim(&mut self, account: &AccountId, now: Timestamp) {
        self.last_claims.insert(*account, now);
    }
}
