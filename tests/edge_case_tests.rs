//! Edge cases for live form input: half-typed numbers, missing profiles,
//! oversized discounts and overflow.

use medbill::core::coerce::{amount_from_f64, parse_amount, parse_quantity};
use medbill::core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn gst18() -> TaxProfile {
    TaxProfile::intra_state("gst_18", dec!(18))
}

/// A line as a form would build it from raw field text.
fn form_line(qty: &str, rate: &str, discount: &str, mode: &str) -> LineItem {
    LineItemBuilder::new(parse_quantity(qty), parse_amount(rate))
        .discount(parse_amount(discount))
        .taxation(TaxationMode::from_code(mode), Some(gst18()))
        .build()
}

// ---------------------------------------------------------------------------
// Coerced input
// ---------------------------------------------------------------------------

#[test]
fn half_typed_fields_contribute_zero() {
    let r = compute(&form_line("", "12.", "", "exclusive"));
    assert_eq!(r.base_amount, Decimal::ZERO);
    assert_eq!(r.total_amount, Decimal::ZERO);
    assert!(r.tax_details.iter().all(|d| d.amount.is_zero()));
}

#[test]
fn garbage_rate_is_zero() {
    let r = compute(&form_line("3", "abc", "0", "inclusive"));
    assert_eq!(r.total_amount, Decimal::ZERO);
    assert_eq!(r.total_tax, Decimal::ZERO);
}

#[test]
fn formatted_rate_is_accepted() {
    let r = compute(&form_line("2", "₹1,000.00", "0", "exclusive"));
    assert_eq!(r.total_amount, dec!(2360.00));
}

#[test]
fn nan_float_is_zero() {
    let line = LineItemBuilder::new(5, amount_from_f64(f64::NAN)).build();
    assert_eq!(compute(&line).total_amount, Decimal::ZERO);
}

#[test]
fn negative_quantity_text_is_zero() {
    let r = compute(&form_line("-2", "100", "0", "none"));
    assert_eq!(r.total_amount, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Missing profile
// ---------------------------------------------------------------------------

#[test]
fn exclusive_without_profile_applies_no_tax() {
    let line = LineItemBuilder::new(2, dec!(500))
        .taxation(TaxationMode::Exclusive, None)
        .build();
    let r = compute(&line);
    assert!(r.tax_details.is_empty());
    assert_eq!(r.total_amount, dec!(1000));
}

#[test]
fn profile_with_no_components() {
    let zero = TaxProfileTable::builtin().resolve("gst_0").unwrap().clone();
    let r = compute(&LineItemBuilder::new(2, dec!(500)).exclusive(zero.clone()).build());
    assert!(r.tax_details.is_empty());
    assert_eq!(r.total_amount, dec!(1000));
    let r = compute(&LineItemBuilder::new(2, dec!(500)).inclusive(zero).build());
    assert_eq!(r.taxable_amount, dec!(1000));
    assert_eq!(r.total_amount, dec!(1000));
}

// ---------------------------------------------------------------------------
// Negative lines
// ---------------------------------------------------------------------------

#[test]
fn negative_line_is_not_clamped() {
    let line = LineItemBuilder::new(1, dec!(100))
        .discount(dec!(130))
        .exclusive(gst18())
        .build();
    let r = compute(&line);
    assert_eq!(r.base_amount, dec!(-30));
    assert_eq!(r.tax_details[0].amount, dec!(-2.70));
    assert_eq!(r.total_amount, dec!(-35.40));
    assert!(r.is_negative());
}

#[test]
fn negative_line_offsets_within_bill() {
    let lines = vec![
        LineItemBuilder::new(1, dec!(500)).build(),
        LineItemBuilder::new(1, dec!(100)).discount(dec!(200)).build(),
    ];
    let totals = aggregate(&lines, Decimal::ZERO, DiscountType::Amount);
    assert_eq!(totals.subtotal, dec!(400));
    assert_eq!(totals.grand_total, dec!(400));
}

#[test]
fn all_negative_bill_floors_grand_total() {
    let lines = vec![LineItemBuilder::new(1, dec!(100)).discount(dec!(300)).build()];
    let totals = aggregate(&lines, Decimal::ZERO, DiscountType::Amount);
    assert_eq!(totals.subtotal, dec!(-200));
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

#[test]
fn percent_discount_on_negative_subtotal() {
    let lines = vec![LineItemBuilder::new(1, dec!(100)).discount(dec!(300)).build()];
    let totals = aggregate(&lines, dec!(10), DiscountType::Percent);
    assert_eq!(totals.discount_amount, dec!(-20.00));
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

#[test]
fn midpoint_component_rounds_up() {
    // 0.50 * 9% = 0.045 -> 0.05
    let r = compute(&LineItemBuilder::new(1, dec!(0.50)).exclusive(gst18()).build());
    assert_eq!(r.tax_details[0].amount, dec!(0.05));
    assert_eq!(r.total_amount, dec!(0.60));
}

#[test]
fn component_rounding_differs_from_total_rounding() {
    // 0.10 * 2.5% = 0.0025 -> 0.00 per component; 0.10 * 5% = 0.005 would round to 0.01
    let r = compute(
        &LineItemBuilder::new(1, dec!(0.10))
            .exclusive(TaxProfile::intra_state("gst_5", dec!(5)))
            .build(),
    );
    assert_eq!(r.total_tax, dec!(0.00));
}

#[test]
fn inclusive_odd_amount() {
    // 999.99 / 1.05 = 952.3714... ; included 47.6186 -> 23.81 + 23.81
    let r = compute(
        &LineItemBuilder::new(1, dec!(999.99))
            .inclusive(TaxProfile::intra_state("gst_5", dec!(5)))
            .build(),
    );
    assert_eq!(r.taxable_amount, dec!(952.37));
    assert_eq!(r.tax_details[0].amount, dec!(23.81));
    assert_eq!(r.tax_details[1].amount, dec!(23.81));
    assert_eq!(r.total_amount, dec!(999.99));
}

// ---------------------------------------------------------------------------
// Extremes
// ---------------------------------------------------------------------------

#[test]
fn overflowing_line_does_not_panic() {
    let lines = vec![
        LineItemBuilder::new(u32::MAX, Decimal::MAX).exclusive(gst18()).build(),
        LineItemBuilder::new(1, dec!(10)).build(),
    ];
    let totals = aggregate(&lines, Decimal::MAX, DiscountType::Percent);
    assert!(totals.grand_total >= Decimal::ZERO);
}

#[test]
fn overflowing_line_keeps_earlier_lines() {
    let lines = vec![
        LineItemBuilder::new(1, Decimal::MAX).build(),
        LineItemBuilder::new(1, Decimal::MAX).build(),
        LineItemBuilder::new(1, dec!(100)).discount(dec!(200)).build(),
    ];
    let totals = aggregate(&lines, Decimal::ZERO, DiscountType::Amount);
    // Only the second line is dropped from the running sum.
    assert_eq!(totals.subtotal, Decimal::MAX - dec!(100));
    assert_eq!(totals.grand_total, Decimal::MAX - dec!(100));
}

#[test]
fn huge_amount_discount() {
    let lines = vec![LineItemBuilder::new(1, dec!(10)).build()];
    let totals = aggregate(&lines, Decimal::MAX, DiscountType::Amount);
    assert_eq!(totals.grand_total, Decimal::ZERO);
}

#[test]
fn bill_line_limit() {
    let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let mut builder = BillBuilder::new("INV-2024-999", DocumentKind::Invoice, date);
    for _ in 0..10_001 {
        builder = builder.add_line(LineItemBuilder::new(1, dec!(1)).build());
    }
    let err = builder.build().unwrap_err();
    assert!(err.to_string().contains("10,000"));
}
