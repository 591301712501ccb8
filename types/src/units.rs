//! Conversion between human-readable token quantities and raw units.
//!
//! A token with `decimals = 18` stores "1.5" as `1_500_000_000_000_000_000`.
//! Decimals never influence ledger arithmetic; they only matter here.

use crate::amount::TokenAmount;
use crate::error::TypesError;
use num_bigint::BigUint;

fn scale(decimals: u8) -> BigUint {
    BigUint::from(10u32).pow(u32::from(decimals))
}

/// Parse a decimal string such as `"1000000"` or `"0.25"` into raw units.
pub fn parse_units(value: &str, decimals: u8) -> Result<TokenAmount, TypesError> {
    let value = value.trim();
    let (int_part, frac_part) = match value.split_once('.') {
        Some((i, f)) => (i, f),
        None => (value, ""),
    };
    let digits_ok = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !digits_ok(int_part) || !digits_ok(frac_part) {
        return Err(TypesError::InvalidAmount(value.to_string()));
    }
    if frac_part.len() > usize::from(decimals) {
        return Err(TypesError::TooManyDecimals {
            got: frac_part.len(),
            decimals,
        });
    }

    let parse = |s: &str| -> BigUint {
        if s.is_empty() {
            BigUint::default()
        } else {
            // Validated as ASCII digits above.
            BigUint::parse_bytes(s.as_bytes(), 10).unwrap_or_default()
        }
    };
    let whole = parse(int_part) * scale(decimals);
    // `frac_part.len() <= decimals <= u8::MAX`, so the cast is lossless.
    let frac = parse(frac_part) * scale(decimals - frac_part.len() as u8);
    TokenAmount::from_raw(whole + frac)
}

/// Render raw units as a decimal string, trimming trailing fractional zeros.
pub fn format_units(amount: &TokenAmount, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = scale(decimals);
    let whole = amount.raw() / &scale;
    let frac = amount.raw() % &scale;
    let frac = format!("{:0>width$}", frac.to_string(), width = usize::from(decimals));
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}
