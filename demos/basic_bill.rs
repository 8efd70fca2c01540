use chrono::NaiveDate;
use medbill::core::*;
use rust_decimal_macros::dec;

fn main() {
    let profiles = TaxProfileTable::builtin();
    let gst18 = profiles.resolve("gst_18").expect("built-in profile").clone();
    let gst12 = profiles.resolve("gst_12").expect("built-in profile").clone();

    let mut numbers = BillNumberSequence::for_kind(DocumentKind::Invoice, 2024);
    let issue_date = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();

    let bill = BillBuilder::new(numbers.next_for_date(issue_date), DocumentKind::Invoice, issue_date)
        .patient("Anita Rao (MRN 004217)")
        .add_line(
            LineItemBuilder::new(1, dec!(800))
                .description("Specialist consultation")
                .exclusive(gst18.clone())
                .build(),
        )
        .add_line(
            LineItemBuilder::new(2, dec!(500))
                .description("Physiotherapy session")
                .inclusive(gst18)
                .build(),
        )
        .add_line(
            LineItemBuilder::new(3, dec!(120))
                .description("Dressing kit")
                .discount_percent(dec!(10))
                .exclusive(gst12)
                .build(),
        )
        .add_line(
            LineItemBuilder::new(1, dec!(350))
                .description("Lab: CBC")
                .build(),
        )
        .overall_discount(dec!(5), DiscountType::Percent)
        .build()
        .expect("bill should be valid");

    println!("Bill:    {}", bill.number);
    println!("Date:    {}", bill.issue_date);
    println!("Patient: {}", bill.patient.as_deref().unwrap_or("-"));
    println!("---");
    for (line, result) in bill.lines.iter().zip(&bill.line_results) {
        println!(
            "  {:<24} {} x {} - {} = {} ({})",
            line.description.as_deref().unwrap_or(""),
            line.quantity,
            line.rate,
            line.discount,
            result.total_amount,
            line.taxation_mode.code()
        );
        for tax in &result.tax_details {
            println!("      {} {}%: {}", tax.name, tax.rate, tax.amount);
        }
    }
    println!("---");
    println!("Subtotal: {}", bill.totals.subtotal);
    for (name, amount) in &bill.totals.tax_breakdown {
        println!("  {name}: {amount}");
    }
    println!("Tax:      {}", bill.totals.total_tax);
    println!("Discount: {}", bill.totals.discount_amount);
    println!("Total:    {}", bill.totals.grand_total);

    let findings = validate_bill(&bill);
    if !findings.is_empty() {
        println!("\nWarnings:");
        for f in findings {
            println!("  {f}");
        }
    }
}
