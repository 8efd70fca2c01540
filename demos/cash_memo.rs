use chrono::NaiveDate;
use medbill::core::coerce::{parse_amount, parse_quantity};
use medbill::core::*;

/// Simulates a cash memo form being edited field by field. Each keystroke
/// rebuilds the line from raw text and recomputes the totals.
fn main() {
    let table = TaxProfileTable::builtin();
    let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
    let mut memo = BillBuilder::new("CM-2024-017", DocumentKind::CashMemo, date).build_unchecked();

    // (quantity, rate, discount, mode, profile id) as typed so far
    let keystrokes = [
        ("", "", "", "none", ""),
        ("2", "", "", "none", ""),
        ("2", "4", "", "none", ""),
        ("2", "45", "", "none", ""),
        ("2", "450", "", "exclusive", ""),
        ("2", "450", "", "exclusive", "gst_5"),
        ("2", "450", "5", "exclusive", "gst_5"),
        ("2", "450", "50", "exclusive", "gst_5"),
    ];

    for (qty, rate, discount, mode, profile) in keystrokes {
        let line = LineItemBuilder::new(parse_quantity(qty), parse_amount(rate))
            .description("Nebulizer rental")
            .discount(parse_amount(discount))
            .taxation(TaxationMode::from_code(mode), table.get(profile).cloned())
            .build();
        memo.lines = vec![line];
        memo.recalculate();
        println!(
            "qty={qty:<2} rate={rate:<4} disc={discount:<3} mode={mode:<9} profile={profile:<6} => total {}",
            memo.totals.grand_total
        );
    }

    let parsed = parse_amount("200");
    memo.set_overall_discount(parsed, DiscountType::from_code("amount"));
    println!("after 200 off: {}", memo.totals.grand_total);
}
