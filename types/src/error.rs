//! Errors raised while constructing or parsing fundamental types.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid account identifier: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount exceeds 256 bits: {0}")]
    AmountOutOfRange(String),

    #[error("too many fractional digits: got {got}, token has {decimals} decimals")]
    TooManyDecimals { got: usize, decimals: u8 },
}
