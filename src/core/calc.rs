//! Line item calculator.
//!
//! Every component amount is rounded to 2 decimal places on its own before
//! summation, so the line tax can differ by a few cents from rounding the
//! unrounded total.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::coerce::{self, round2};
use super::types::{LineItem, LineItemResult, TaxDetail, TaxProfile, TaxationMode};

const HUNDRED: Decimal = dec!(100);

/// Compute base amount, per-component tax and total for one line.
///
/// Never panics: overflow and division by zero contribute zero. A taxed mode
/// without an attached profile is treated as untaxed.
///
/// ```
/// use medbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let line = LineItemBuilder::new(2, dec!(500))
///     .exclusive(TaxProfile::intra_state("gst_18", dec!(18)))
///     .build();
/// let result = compute(&line);
/// assert_eq!(result.base_amount, dec!(1000));
/// assert_eq!(result.total_amount, dec!(1180.00));
/// ```
pub fn compute(item: &LineItem) -> LineItemResult {
    let gross = coerce::mul(Decimal::from(item.quantity), item.rate);
    // Not clamped: a discount above the gross amount yields a negative line.
    let base_amount = coerce::sub(gross, item.discount);

    match (item.taxation_mode, &item.tax_profile) {
        (TaxationMode::Exclusive, Some(profile)) => exclusive(base_amount, profile),
        (TaxationMode::Inclusive, Some(profile)) => inclusive(base_amount, profile),
        _ => untaxed(base_amount),
    }
}

/// Compute every line in order.
pub fn compute_all(items: &[LineItem]) -> Vec<LineItemResult> {
    items.iter().map(compute).collect()
}

fn untaxed(base_amount: Decimal) -> LineItemResult {
    LineItemResult {
        base_amount,
        taxable_amount: base_amount,
        tax_details: Vec::new(),
        total_tax: Decimal::ZERO,
        total_amount: round2(base_amount),
    }
}

fn exclusive(base_amount: Decimal, profile: &TaxProfile) -> LineItemResult {
    let tax_details: Vec<TaxDetail> = profile
        .components
        .iter()
        .map(|c| TaxDetail {
            name: c.name.clone(),
            rate: c.rate,
            amount: round2(coerce::div(coerce::mul(base_amount, c.rate), HUNDRED)),
        })
        .collect();
    let total_tax = sum_details(&tax_details);

    LineItemResult {
        base_amount,
        taxable_amount: base_amount,
        tax_details,
        total_tax,
        total_amount: round2(coerce::add(base_amount, total_tax)),
    }
}

fn inclusive(base_amount: Decimal, profile: &TaxProfile) -> LineItemResult {
    let divisor = coerce::add(Decimal::ONE, coerce::div(profile.total_rate, HUNDRED));
    if divisor.is_zero() {
        return untaxed(base_amount);
    }
    let net_amount = coerce::div(base_amount, divisor);
    let included_tax = coerce::sub(base_amount, net_amount);

    let tax_details: Vec<TaxDetail> = profile
        .components
        .iter()
        .map(|c| {
            let share = if profile.total_rate.is_zero() {
                Decimal::ZERO
            } else {
                coerce::div(c.rate, profile.total_rate)
            };
            TaxDetail {
                name: c.name.clone(),
                rate: c.rate,
                amount: round2(coerce::mul(included_tax, share)),
            }
        })
        .collect();
    let total_tax = sum_details(&tax_details);

    LineItemResult {
        base_amount,
        taxable_amount: round2(net_amount),
        tax_details,
        total_tax,
        total_amount: round2(base_amount),
    }
}

fn sum_details(details: &[TaxDetail]) -> Decimal {
    details
        .iter()
        .fold(Decimal::ZERO, |acc, d| coerce::accumulate(acc, d.amount))
}
