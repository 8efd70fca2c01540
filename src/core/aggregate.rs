//! Bill totals: subtotal, tax breakdown, overall discount and grand total.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::calc;
use super::coerce::{self, round2};
use super::types::{DiscountType, InvoiceTotals, LineItem, LineItemResult};

/// Compute every line and roll the results up into bill totals.
///
/// Pure and total: identical inputs always give identical totals, so it is
/// safe to call after every edit.
///
/// ```
/// use medbill::core::*;
/// use rust_decimal_macros::dec;
///
/// let lines = vec![
///     LineItemBuilder::new(2, dec!(500))
///         .exclusive(TaxProfile::intra_state("gst_18", dec!(18)))
///         .build(),
///     LineItemBuilder::new(1, dec!(500)).build(),
/// ];
/// let totals = aggregate(&lines, dec!(10), DiscountType::Percent);
/// assert_eq!(totals.subtotal, dec!(1680.00));
/// assert_eq!(totals.grand_total, dec!(1512.00));
/// ```
pub fn aggregate(
    items: &[LineItem],
    overall_discount: Decimal,
    discount_type: DiscountType,
) -> InvoiceTotals {
    let results = calc::compute_all(items);
    aggregate_results(&results, overall_discount, discount_type)
}

/// Roll already computed line results up into bill totals.
pub fn aggregate_results(
    results: &[LineItemResult],
    overall_discount: Decimal,
    discount_type: DiscountType,
) -> InvoiceTotals {
    let subtotal = results
        .iter()
        .fold(Decimal::ZERO, |acc, r| coerce::accumulate(acc, r.total_amount));

    // Merged by exact name; the same name under different rates is summed as one.
    let mut tax_breakdown: BTreeMap<String, Decimal> = BTreeMap::new();
    for detail in results.iter().flat_map(|r| &r.tax_details) {
        let entry = tax_breakdown
            .entry(detail.name.clone())
            .or_insert(Decimal::ZERO);
        *entry = coerce::accumulate(*entry, detail.amount);
    }
    let total_tax = tax_breakdown
        .values()
        .fold(Decimal::ZERO, |acc, v| coerce::accumulate(acc, *v));

    let discount_amount = resolve_discount(subtotal, overall_discount, discount_type);
    let grand_total = coerce::sub(subtotal, discount_amount).max(Decimal::ZERO);

    tracing::debug!(
        lines = results.len(),
        %subtotal,
        %discount_amount,
        %grand_total,
        "aggregated bill totals"
    );

    InvoiceTotals {
        subtotal,
        tax_breakdown,
        total_tax,
        overall_discount,
        overall_discount_type: discount_type,
        discount_amount,
        grand_total: round2(grand_total),
    }
}

/// Discount in currency for the given subtotal. Negative inputs count as zero.
pub fn resolve_discount(
    subtotal: Decimal,
    overall_discount: Decimal,
    discount_type: DiscountType,
) -> Decimal {
    let discount = overall_discount.max(Decimal::ZERO);
    let amount = match discount_type {
        DiscountType::Amount => discount,
        DiscountType::Percent => coerce::div(coerce::mul(subtotal, discount), dec!(100)),
    };
    round2(amount)
}
