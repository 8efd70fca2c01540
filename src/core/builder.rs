use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::coerce::{self, round2};
use super::error::BillingError;
use super::types::*;
use super::{aggregate, calc};

/// Builder for bills (invoices and cash memos).
///
/// ```
/// use medbill::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let bill = BillBuilder::new("INV-2024-001", DocumentKind::Invoice, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
///     .patient("R. Sharma")
///     .add_line(LineItemBuilder::new(1, dec!(800))
///         .description("Consultation")
///         .exclusive(TaxProfile::intra_state("gst_18", dec!(18)))
///         .build())
///     .build()
///     .unwrap();
/// assert_eq!(bill.totals.grand_total, dec!(944.00));
/// ```
pub struct BillBuilder {
    number: String,
    kind: DocumentKind,
    issue_date: NaiveDate,
    patient: Option<String>,
    notes: Vec<String>,
    lines: Vec<LineItem>,
    overall_discount: Decimal,
    discount_type: DiscountType,
}

impl BillBuilder {
    pub fn new(number: impl Into<String>, kind: DocumentKind, issue_date: NaiveDate) -> Self {
        Self {
            number: number.into(),
            kind,
            issue_date,
            patient: None,
            notes: Vec::new(),
            lines: Vec::new(),
            overall_discount: Decimal::ZERO,
            discount_type: DiscountType::Amount,
        }
    }

    pub fn patient(mut self, patient: impl Into<String>) -> Self {
        self.patient = Some(patient.into());
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn add_line(mut self, line: LineItem) -> Self {
        self.lines.push(line);
        self
    }

    pub fn overall_discount(mut self, amount: Decimal, discount_type: DiscountType) -> Self {
        self.overall_discount = amount;
        self.discount_type = discount_type;
        self
    }

    /// Build the bill and compute its totals.
    pub fn build(self) -> Result<Bill, BillingError> {
        if self.number.trim().is_empty() {
            return Err(BillingError::Builder("bill number is required".into()));
        }
        if self.lines.is_empty() {
            return Err(BillingError::Builder(
                "at least one line item is required".into(),
            ));
        }

        // Input limits to prevent abuse
        if self.lines.len() > 10_000 {
            return Err(BillingError::Builder(
                "bill cannot have more than 10,000 line items".into(),
            ));
        }
        if self.number.len() > 200 {
            return Err(BillingError::Builder(
                "bill number cannot exceed 200 characters".into(),
            ));
        }
        if self.notes.len() > 100 {
            return Err(BillingError::Builder(
                "bill cannot have more than 100 notes".into(),
            ));
        }

        Ok(self.build_unchecked())
    }

    /// Build without the presence and size checks, e.g. for an empty draft.
    pub fn build_unchecked(self) -> Bill {
        let line_results = calc::compute_all(&self.lines);
        let totals =
            aggregate::aggregate_results(&line_results, self.overall_discount, self.discount_type);

        Bill {
            number: self.number,
            kind: self.kind,
            issue_date: self.issue_date,
            patient: self.patient,
            notes: self.notes,
            lines: self.lines,
            line_results,
            totals,
        }
    }
}

/// Builder for LineItem.
pub struct LineItemBuilder {
    description: Option<String>,
    quantity: u32,
    rate: Decimal,
    discount: Discount,
    taxation_mode: TaxationMode,
    tax_profile: Option<TaxProfile>,
}

enum Discount {
    Flat(Decimal),
    Percent(Decimal),
}

impl LineItemBuilder {
    pub fn new(quantity: u32, rate: Decimal) -> Self {
        Self {
            description: None,
            quantity,
            rate,
            discount: Discount::Flat(Decimal::ZERO),
            taxation_mode: TaxationMode::None,
            tax_profile: None,
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Flat discount in currency.
    pub fn discount(mut self, amount: Decimal) -> Self {
        self.discount = Discount::Flat(amount);
        self
    }

    /// Percentage of `quantity * rate`, converted to a flat amount on build.
    pub fn discount_percent(mut self, percent: Decimal) -> Self {
        self.discount = Discount::Percent(percent);
        self
    }

    /// Tax added on top of the line amount.
    pub fn exclusive(mut self, profile: TaxProfile) -> Self {
        self.taxation_mode = TaxationMode::Exclusive;
        self.tax_profile = Some(profile);
        self
    }

    /// Tax already contained in the line amount.
    pub fn inclusive(mut self, profile: TaxProfile) -> Self {
        self.taxation_mode = TaxationMode::Inclusive;
        self.tax_profile = Some(profile);
        self
    }

    pub fn no_tax(mut self) -> Self {
        self.taxation_mode = TaxationMode::None;
        self.tax_profile = None;
        self
    }

    /// Set mode and profile independently, as a form does.
    pub fn taxation(mut self, mode: TaxationMode, profile: Option<TaxProfile>) -> Self {
        self.taxation_mode = mode;
        self.tax_profile = profile;
        self
    }

    pub fn build(self) -> LineItem {
        let discount = match self.discount {
            Discount::Flat(amount) => amount,
            Discount::Percent(percent) => {
                let gross = coerce::mul(Decimal::from(self.quantity), self.rate);
                round2(coerce::div(coerce::mul(gross, percent), dec!(100)))
            }
        };

        LineItem {
            description: self.description,
            quantity: self.quantity,
            rate: self.rate,
            discount,
            taxation_mode: self.taxation_mode,
            tax_profile: self.tax_profile,
        }
    }
}

/// Builder for TaxProfile. The total rate defaults to the component sum.
pub struct TaxProfileBuilder {
    id: String,
    display_name: String,
    components: Vec<TaxComponent>,
    total_rate: Option<Decimal>,
}

impl TaxProfileBuilder {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            components: Vec::new(),
            total_rate: None,
        }
    }

    pub fn component(mut self, name: impl Into<String>, rate: Decimal) -> Self {
        self.components.push(TaxComponent::new(name, rate));
        self
    }

    /// Override the total rate instead of summing the components.
    pub fn total_rate(mut self, rate: Decimal) -> Self {
        self.total_rate = Some(rate);
        self
    }

    pub fn build(self) -> TaxProfile {
        let mut profile = TaxProfile {
            id: self.id,
            display_name: self.display_name,
            total_rate: Decimal::ZERO,
            components: self.components,
        };
        profile.total_rate = self
            .total_rate
            .unwrap_or_else(|| profile.component_rate_sum());
        profile
    }
}
