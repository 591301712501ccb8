//! Token amount type.
//!
//! Amounts are unsigned 256-bit integers in the token's smallest unit. The
//! arithmetic here never wraps: anything that would leave `[0, MAX]` yields
//! `None` and the caller decides which error that becomes.

use crate::error::TypesError;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static MAX_RAW: LazyLock<BigUint> =
    LazyLock::new(|| (BigUint::one() << TokenAmount::BITS) - BigUint::one());

/// An unsigned token amount bounded to 256 bits.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    /// Width of the representable range.
    pub const BITS: u32 = 256;

    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The largest representable amount, `2^256 - 1`.
    pub fn max() -> Self {
        Self(MAX_RAW.clone())
    }

    /// Wrap a raw integer, rejecting anything wider than 256 bits.
    pub fn from_raw(raw: BigUint) -> Result<Self, TypesError> {
        if raw.bits() > u64::from(Self::BITS) {
            return Err(TypesError::AmountOutOfRange(raw.to_string()));
        }
        Ok(Self(raw))
    }

    pub fn raw(&self) -> &BigUint {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_max(&self) -> bool {
        self.0 == *MAX_RAW
    }

    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        let sum = &self.0 + &other.0;
        (sum <= *MAX_RAW).then_some(Self(sum))
    }

    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        (self.0 >= other.0).then(|| Self(&self.0 - &other.0))
    }

    pub fn saturating_sub(&self, other: &Self) -> Self {
        self.checked_sub(other).unwrap_or_else(Self::zero)
    }
}

impl From<u64> for TokenAmount {
    fn from(raw: u64) -> Self {
        Self(BigUint::from(raw))
    }
}

impl From<u128> for TokenAmount {
    fn from(raw: u128) -> Self {
        Self(BigUint::from(raw))
    }
}

impl TryFrom<BigUint> for TokenAmount {
    type Error = TypesError;

    fn try_from(raw: BigUint) -> Result<Self, Self::Error> {
        Self::from_raw(raw)
    }
}

impl FromStr for TokenAmount {
    type Err = TypesError;

    /// Parse a plain base-10 integer of raw units.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().replace('_', "");
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TypesError::InvalidAmount(s.to_string()));
        }
        let raw = BigUint::parse_bytes(digits.as_bytes(), 10)
            .ok_or_else(|| TypesError::InvalidAmount(s.to_string()))?;
        Self::from_raw(raw)
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_max() {
            f.write_str("TokenAmount(MAX)")
        } else {
            write!(f, "TokenAmount({})", self.0)
        }
    }
}

// Decimal strings keep 256-bit values intact in JSON and TOML, which both
// cap native integers at 64 bits. Binary formats get the same string.
impl Serialize for TokenAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AmountVisitor;

        impl Visitor<'_> for AmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a non-negative integer or decimal string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<TokenAmount, E> {
                v.parse().map_err(E::custom)
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<TokenAmount, E> {
                Ok(TokenAmount::from(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<TokenAmount, E> {
                u64::try_from(v)
                    .map(TokenAmount::from)
                    .map_err(|_| E::custom(format!("negative amount: {v}")))
            }
        }

        if deserializer.is_human_readable() {
            deserializer.deserialize_any(AmountVisitor)
        } else {
            deserializer.deserialize_str(AmountVisitor)
        }
    }
}
