use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One named tax (e.g. CGST) with a flat percentage rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComponent {
    /// Component name as printed on the bill (e.g. "CGST").
    pub name: String,
    /// Percentage rate (9 means 9%).
    pub rate: Decimal,
}

impl TaxComponent {
    pub fn new(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            rate,
        }
    }
}

/// A named tax scheme such as "GST 18%" and its component breakdown.
///
/// `total_rate` is expected to equal the sum of the component rates. The
/// calculator trusts it as given; see [`validate_profile`](super::validate_profile)
/// for an advisory check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxProfile {
    /// Catalog key (e.g. "gst_18").
    pub id: String,
    /// Human-readable name (e.g. "GST 18%").
    pub display_name: String,
    /// Combined percentage rate of all components.
    pub total_rate: Decimal,
    /// Ordered component breakdown.
    pub components: Vec<TaxComponent>,
}

/// How tax relates to the entered line amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxationMode {
    /// No tax applied.
    #[default]
    None,
    /// Tax is added on top of the line amount.
    Exclusive,
    /// Tax is already contained in the line amount.
    Inclusive,
}

impl TaxationMode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Exclusive => "exclusive",
            Self::Inclusive => "inclusive",
        }
    }

    /// Parse a form value. Unknown values fall back to [`TaxationMode::None`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Self::Exclusive,
            "inclusive" => Self::Inclusive,
            _ => Self::None,
        }
    }
}

/// Interpretation of the overall (bill-level) discount value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Flat currency amount.
    #[default]
    Amount,
    /// Percentage of the subtotal.
    Percent,
}

impl DiscountType {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Amount => "amount",
            Self::Percent => "percent",
        }
    }

    /// Parse a form value. Unknown values fall back to [`DiscountType::Amount`].
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "percent" | "percentage" | "%" => Self::Percent,
            _ => Self::Amount,
        }
    }
}

/// A single billable line as entered on the form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Service or product description.
    pub description: Option<String>,
    /// Number of units.
    pub quantity: u32,
    /// Price per unit.
    pub rate: Decimal,
    /// Flat discount applied to `quantity * rate` before tax.
    pub discount: Decimal,
    /// Taxation scheme for this line.
    pub taxation_mode: TaxationMode,
    /// Attached tax profile. Without one the line is untaxed regardless of mode.
    pub tax_profile: Option<TaxProfile>,
}

/// Tax levied by one component on one line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxDetail {
    pub name: String,
    pub rate: Decimal,
    pub amount: Decimal,
}

/// Derived amounts for a single line. Recomputed on every change, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemResult {
    /// `quantity * rate - discount`, not clamped.
    pub base_amount: Decimal,
    /// Net value the tax was levied on (equals `base_amount` unless inclusive).
    pub taxable_amount: Decimal,
    /// Per-component tax, in profile order.
    pub tax_details: Vec<TaxDetail>,
    /// Sum of `tax_details` amounts.
    pub total_tax: Decimal,
    /// Line total, rounded to 2 decimal places.
    pub total_amount: Decimal,
}

impl LineItemResult {
    /// True when the line discount exceeded the gross line amount.
    pub fn is_negative(&self) -> bool {
        self.base_amount.is_sign_negative() && !self.base_amount.is_zero()
    }
}

/// Bill-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    /// Sum of all line totals.
    pub subtotal: Decimal,
    /// Tax per component name, summed across lines.
    pub tax_breakdown: BTreeMap<String, Decimal>,
    /// Sum of `tax_breakdown` values.
    pub total_tax: Decimal,
    /// Discount value as entered.
    pub overall_discount: Decimal,
    /// How `overall_discount` is interpreted.
    pub overall_discount_type: DiscountType,
    /// Resolved discount in currency.
    pub discount_amount: Decimal,
    /// `max(0, subtotal - discount_amount)`.
    pub grand_total: Decimal,
}

impl InvoiceTotals {
    /// Summed tax for a component name, zero when no line carries it.
    pub fn tax_amount(&self, name: &str) -> Decimal {
        self.tax_breakdown
            .get(name)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Kind of billing document the totals are persisted onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Credit invoice, settled later.
    Invoice,
    /// Cash memo, settled at the counter.
    CashMemo,
}

impl DocumentKind {
    /// Default number prefix.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Invoice => "INV-",
            Self::CashMemo => "CM-",
        }
    }
}

/// An invoice or cash memo with its computed totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bill {
    /// Document number (e.g. "INV-2024-001").
    pub number: String,
    pub kind: DocumentKind,
    pub issue_date: NaiveDate,
    /// Patient name or registration number.
    pub patient: Option<String>,
    pub notes: Vec<String>,
    pub lines: Vec<LineItem>,
    /// One result per entry in `lines`, same order.
    pub line_results: Vec<LineItemResult>,
    pub totals: InvoiceTotals,
}

impl Bill {
    /// Recompute line results and totals after `lines` or the discount changed.
    pub fn recalculate(&mut self) {
        self.line_results = super::calc::compute_all(&self.lines);
        self.totals = super::aggregate::aggregate_results(
            &self.line_results,
            self.totals.overall_discount,
            self.totals.overall_discount_type,
        );
    }

    /// Change the overall discount and recompute totals.
    pub fn set_overall_discount(&mut self, amount: Decimal, discount_type: DiscountType) {
        self.totals.overall_discount = amount;
        self.totals.overall_discount_type = discount_type;
        self.recalculate();
    }
}
