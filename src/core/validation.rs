//! Advisory checks for profiles, lines and totals.
//!
//! Nothing here runs during calculation. These report inputs the calculator
//! silently tolerates so an embedding form can warn before saving.

use rust_decimal::Decimal;

use super::coerce;
use super::error::ValidationError;
use super::types::*;

/// Check a tax profile from the catalog.
pub fn validate_profile(profile: &TaxProfile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if profile.id.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "profile.id",
            "profile id must not be empty",
            "PROFILE-ID",
        ));
    }

    if profile.total_rate < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "profile.total_rate",
            format!("total rate {} must not be negative", profile.total_rate),
            "PROFILE-RATE",
        ));
    }

    for (i, component) in profile.components.iter().enumerate() {
        if component.name.trim().is_empty() {
            errors.push(ValidationError::with_rule(
                format!("profile.components[{i}].name"),
                "component name must not be empty",
                "PROFILE-COMPONENT",
            ));
        }
        if component.rate < Decimal::ZERO {
            errors.push(ValidationError::with_rule(
                format!("profile.components[{i}].rate"),
                format!("component rate {} must not be negative", component.rate),
                "PROFILE-RATE",
            ));
        }
    }

    let sum = profile.component_rate_sum();
    if sum != profile.total_rate {
        errors.push(ValidationError::with_rule(
            "profile.total_rate",
            format!(
                "total rate {} does not match sum of component rates {}",
                profile.total_rate, sum
            ),
            "PROFILE-SUM",
        ));
    }

    errors
}

/// Check a line as entered. `index` is used for the field path.
pub fn validate_line(line: &LineItem, index: usize) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let prefix = format!("lines[{index}]");

    if line.rate < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.rate"),
            format!("rate {} must not be negative", line.rate),
            "LINE-RATE",
        ));
    }

    if line.discount < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.discount"),
            format!("discount {} must not be negative", line.discount),
            "LINE-DISCOUNT",
        ));
    }

    // An overflowing gross is computed as zero; no base check is possible then.
    let gross = Decimal::from(line.quantity).checked_mul(line.rate);
    if let Some(gross) = gross.filter(|g| line.discount > *g) {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.discount"),
            format!(
                "discount {} exceeds line amount {gross}; the line total will be negative",
                line.discount
            ),
            "LINE-NEG-BASE",
        ));
    }

    if line.taxation_mode != TaxationMode::None && line.tax_profile.is_none() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.tax_profile"),
            format!(
                "taxation mode '{}' has no tax profile; no tax will be applied",
                line.taxation_mode.code()
            ),
            "LINE-NO-PROFILE",
        ));
    }

    if let Some(profile) = &line.tax_profile {
        for mut e in validate_profile(profile) {
            e.field = format!("{prefix}.{}", e.field);
            errors.push(e);
        }
    }

    errors
}

/// Check that totals are consistent with the line results they came from.
pub fn validate_totals(results: &[LineItemResult], totals: &InvoiceTotals) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let expected_subtotal = results
        .iter()
        .fold(Decimal::ZERO, |acc, r| coerce::accumulate(acc, r.total_amount));
    if totals.subtotal != expected_subtotal {
        errors.push(ValidationError::with_rule(
            "totals.subtotal",
            format!(
                "subtotal {} does not match sum of line totals {}",
                totals.subtotal, expected_subtotal
            ),
            "TOTAL-SUBTOTAL",
        ));
    }

    let breakdown_sum = totals
        .tax_breakdown
        .values()
        .fold(Decimal::ZERO, |acc, v| coerce::accumulate(acc, *v));
    if totals.total_tax != breakdown_sum {
        errors.push(ValidationError::with_rule(
            "totals.total_tax",
            format!(
                "total tax {} does not match sum of breakdown amounts {}",
                totals.total_tax, breakdown_sum
            ),
            "TOTAL-TAX",
        ));
    }

    let expected_grand =
        coerce::round2(coerce::sub(totals.subtotal, totals.discount_amount).max(Decimal::ZERO));
    if totals.grand_total != expected_grand {
        errors.push(ValidationError::with_rule(
            "totals.grand_total",
            format!(
                "grand total {} does not match subtotal {} - discount {}",
                totals.grand_total, totals.subtotal, totals.discount_amount
            ),
            "TOTAL-GRAND",
        ));
    }

    if totals.grand_total < Decimal::ZERO {
        errors.push(ValidationError::with_rule(
            "totals.grand_total",
            "grand total must not be negative",
            "TOTAL-NEGATIVE",
        ));
    }

    errors
}

/// Run line and totals checks over a whole bill.
pub fn validate_bill(bill: &Bill) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if bill.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "bill number must not be empty",
            "BILL-NUMBER",
        ));
    }

    for (i, line) in bill.lines.iter().enumerate() {
        errors.extend(validate_line(line, i));
    }

    if bill.line_results.len() != bill.lines.len() {
        errors.push(ValidationError::with_rule(
            "line_results",
            "line results are stale; call recalculate()",
            "BILL-STALE",
        ));
    }

    errors.extend(validate_totals(&bill.line_results, &bill.totals));
    errors
}
