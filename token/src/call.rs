//! Ledger calls as data.
//!
//! Hosts that receive calls over some transport (a script file, a fuzzer,
//! a message queue) decode them into [`Call`] and hand them to
//! [`TokenLedger::execute`].

use crate::engine::TokenLedger;
use crate::error::TokenError;
use crate::events::Receipt;
use fungible_types::{AccountId, Timestamp, TokenAmount};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Call {
    Transfer {
        to: AccountId,
        amount: TokenAmount,
    },
    Approve {
        spender: AccountId,
        amount: TokenAmount,
    },
    TransferFrom {
        from: AccountId,
        to: AccountId,
        amount: TokenAmount,
    },
    IncreaseAllowance {
        spender: AccountId,
        delta: TokenAmount,
    },
    DecreaseAllowance {
        spender: AccountId,
        delta: TokenAmount,
    },
    Mint {
        to: AccountId,
        amount: TokenAmount,
    },
    Burn {
        amount: TokenAmount,
    },
    BurnFrom {
        owner: AccountId,
        amount: TokenAmount,
    },
    Claim,
    TransferAdmin {
        new_admin: AccountId,
    },
}

impl Call {
    pub fn name(&self) -> &'static str {
        match self {
            Call::Transfer { .. } => "transfer",
            Call::Approve { .. } => "approve",
            Call::TransferFrom { .. } => "transfer_from",
            Call::IncreaseAllowance { .. } => "increase_allowance",
            Call::DecreaseAllowance { .. } => "decrease_allowance",
            Call::Mint { .. } => "mint",
            Call::Burn { .. } => "burn",
            Call::BurnFrom { .. } => "burn_from",
            Call::Claim => "claim",
            Call::TransferAdmin { .. } => "transfer_admin",
        }
    }
}

impl TokenLedger {
    /// Run one call on behalf of `caller`. `now` only matters for faucet
    /// claims.
    pub fn execute(&mut self, caller: AccountId, call: Call, now: Timestamp) -> Result<Receipt, TokenError> {
        match call {
            Call::Transfer { to, amount } => self.transfer(caller, to, amount),
            Call::Approve { spender, amount } => self.approve(caller, spender, amount),
            Call::TransferFrom { from, to, amount } => self.transfer_from(caller, from, to, amount),
            Call::IncreaseAllowance { spender, delta } => self.increase_allowance(caller, spender, delta),
            Call::DecreaseAllowance { spender, delta } => self.decrease_allowance(caller, spender, delta),
            Call::Mint { to, amount } => self.mint(caller, to, amount),
            Call::Burn { amount } => self.burn(caller, amount),
            Call::BurnFrom { owner, amount } => self.burn_from(caller, owner, amount),
            Call::Claim => self.claim(caller, now),
            Call::TransferAdmin { new_admin } => self.transfer_admin(caller, new_admin),
        }
    }
}
