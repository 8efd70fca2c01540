#![no_main]

use libfuzzer_sys::fuzz_target;
use medbill::core::*;
use rust_decimal::Decimal;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    // Fields: quantity|rate|discount|mode|overall|type
    let mut fields = s.split('|');
    let mut next = || fields.next().unwrap_or("");
    let quantity = coerce::parse_quantity(next());
    let rate = coerce::parse_amount(next());
    let discount = coerce::parse_amount(next());
    let mode = TaxationMode::from_code(next());
    let overall = coerce::parse_amount(next());
    let discount_type = DiscountType::from_code(next());

    let lines: Vec<LineItem> = TaxProfileTable::builtin()
        .iter()
        .map(|p| {
            LineItemBuilder::new(quantity, rate)
                .discount(discount)
                .taxation(mode, Some(p.clone()))
                .build()
        })
        .collect();

    let totals = aggregate(&lines, overall, discount_type);
    assert!(totals.grand_total >= Decimal::ZERO);
});
