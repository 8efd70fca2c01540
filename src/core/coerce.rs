//! Lenient numeric coercion for live-edited form input.
//!
//! Anything that does not parse as a finite number becomes zero, so a
//! half-typed field contributes nothing to the totals instead of failing.

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Parse a currency amount or rate. Blank, malformed or non-finite input is zero.
///
/// Accepts grouping commas and a leading currency symbol ("₹1,250.50").
pub fn parse_amount(input: &str) -> Decimal {
    let cleaned: String = input
        .trim()
        .trim_start_matches(['₹', '$', '€'])
        .chars()
        .filter(|c| *c != ',' && *c != '_' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return Decimal::ZERO;
    }
    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .unwrap_or(Decimal::ZERO)
}

/// Parse a quantity. Fractions truncate, negatives and garbage become zero.
pub fn parse_quantity(input: &str) -> u32 {
    let value = parse_amount(input);
    if value.is_sign_negative() {
        return 0;
    }
    value.trunc().to_u32().unwrap_or(0)
}

/// Convert a float, mapping NaN and infinities to zero.
pub fn amount_from_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

// Checked arithmetic: overflow and division by zero contribute nothing.

pub(crate) fn mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).unwrap_or(Decimal::ZERO)
}

pub(crate) fn div(a: Decimal, b: Decimal) -> Decimal {
    a.checked_div(b).unwrap_or(Decimal::ZERO)
}

pub(crate) fn add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::ZERO)
}

pub(crate) fn sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(Decimal::ZERO)
}

/// Running-sum step: a term that would overflow is skipped, earlier terms are kept.
pub(crate) fn accumulate(acc: Decimal, term: Decimal) -> Decimal {
    acc.checked_add(term).unwrap_or(acc)
}

/// Round to `dp` decimal places, half away from zero (commercial rounding).
pub fn round_half_up(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Round a currency amount to 2 decimal places.
pub fn round2(value: Decimal) -> Decimal {
    round_half_up(value, 2)
}
