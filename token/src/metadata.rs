//! Immutable token metadata.

use fungible_types::{format_units, parse_units, TokenAmount, TypesError};
use serde::{Deserialize, Serialize};

/// Conventional precision for tokens that mirror ether's 18 decimals.
pub const DEFAULT_DECIMALS: u8 = 18;

/// Name, symbol and decimal precision, fixed at construction.
///
/// `decimals` only changes how amounts are shown to people; the ledger
/// itself counts raw integer units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    name: String,
    symbol: String,
    decimals: u8,
}

impl TokenMetadata {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn decimals(&self) -> u8 {
        self.decimals
    }

    /// Scale a human-readable quantity ("1.5") into raw units.
    pub fn parse_amount(&self, value: &str) -> Result<TokenAmount, TypesError> {
        parse_units(value, self.decimals)
    }

    /// Render raw units with this token's precision and symbol.
    pub fn format_amount(&self, amount: &TokenAmount) -> String {
        format!("{} {}", format_units(amount, self.decimals), self.symbol)
    }
}
