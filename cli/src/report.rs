//! What a replay produced, in a shape that serializes cleanly to JSON.

use fungible_token::{TokenError, TokenLedger};
use fungible_types::{AccountId, EventRecord, TokenAmount};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StepOutcome {
    pub index: usize,
    pub caller: AccountId,
    pub op: &'static str,
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl StepOutcome {
    pub(crate) fn accepted(index: usize, caller: AccountId, op: &'static str, events: usize) -> Self {
        Self {
            index,
            caller,
            op,
            accepted: true,
            events: Some(events),
            error: None,
        }
    }

    pub(crate) fn rejected(index: usize, caller: AccountId, op: &'static str, error: &TokenError) -> Self {
        Self {
            index,
            caller,
            op,
            accepted: false,
            events: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Report {
    pub token: TokenSummary,
    pub outcomes: Vec<StepOutcome>,
    pub events: Vec<EventRecord>,
    pub balances: BTreeMap<AccountId, TokenAmount>,
    pub allowances: Vec<AllowanceLine>,
}

#[derive(Clone, Debug, Serialize)]
pub struct TokenSummary {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub total_supply: TokenAmount,
    /// Total supply scaled by `decimals`, with the symbol, e.g. `"1000.5 TKN"`.
    pub total_supply_display: String,
    pub admin: AccountId,
}

#[derive(Clone, Debug, Serialize)]
pub struct AllowanceLine {
    pub owner: AccountId,
    pub spender: AccountId,
    pub amount: TokenAmount,
}

impl Report {
    pub(crate) fn new(ledger: &TokenLedger, outcomes: Vec<StepOutcome>) -> Self {
        let token = TokenSummary {
            name: ledger.name().to_string(),
            symbol: ledger.symbol().to_string(),
            decimals: ledger.decimals(),
            total_supply: ledger.total_supply().clone(),
            total_supply_display: ledger.metadata().format_amount(ledger.total_supply()),
            admin: *ledger.admin(),
        };
        Self {
            token,
            outcomes,
            events: ledger.events().entries().to_vec(),
            balances: ledger
                .accounts()
                .holders()
                .map(|(account, amount)| (*account, amount.clone()))
                .collect(),
            allowances: ledger
                .allowances()
                .grants()
                .map(|(owner, spender, amount)| AllowanceLine {
                    owner: *owner,
                    spender: *spender,
                    amount: amount.clone(),
                })
                .collect(),
        }
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.accepted).count()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
