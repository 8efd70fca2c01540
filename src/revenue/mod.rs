//! Revenue rollups for the billing dashboard.
//!
//! Works on already computed bill totals; nothing is recalculated here.
//!
//! # Example
//!
//! ```ignore
//! use medbill::revenue::*;
//!
//! let entries: Vec<RevenueEntry> = bills.iter().map(RevenueEntry::from).collect();
//! let summary = summarize(&entries);
//! let by_month = monthly_revenue(&entries);
//! ```

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::coerce::accumulate;
use crate::core::{Bill, DocumentKind, InvoiceTotals};

/// One billed document as seen by the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevenueEntry {
    pub date: NaiveDate,
    pub kind: DocumentKind,
    pub totals: InvoiceTotals,
}

impl From<&Bill> for RevenueEntry {
    fn from(bill: &Bill) -> Self {
        Self {
            date: bill.issue_date,
            kind: bill.kind,
            totals: bill.totals.clone(),
        }
    }
}

/// Aggregate figures over a set of bills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub bill_count: usize,
    /// Sum of grand totals.
    pub gross: Decimal,
    /// Sum of total tax.
    pub tax: Decimal,
    /// Sum of resolved overall discounts.
    pub discounts: Decimal,
    /// Tax per component name.
    pub tax_by_component: BTreeMap<String, Decimal>,
    /// Grand totals per document kind.
    pub by_kind: BTreeMap<DocumentKind, Decimal>,
}

pub fn summarize(entries: &[RevenueEntry]) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for entry in entries {
        let t = &entry.totals;
        summary.bill_count += 1;
        summary.gross = accumulate(summary.gross, t.grand_total);
        summary.tax = accumulate(summary.tax, t.total_tax);
        summary.discounts = accumulate(summary.discounts, t.discount_amount);
        for (name, amount) in &t.tax_breakdown {
            let sum = summary
                .tax_by_component
                .entry(name.clone())
                .or_insert(Decimal::ZERO);
            *sum = accumulate(*sum, *amount);
        }
        let kind_total = summary.by_kind.entry(entry.kind).or_insert(Decimal::ZERO);
        *kind_total = accumulate(*kind_total, t.grand_total);
    }
    summary
}

/// Summary restricted to bills dated within `from..=to`.
pub fn revenue_between(entries: &[RevenueEntry], from: NaiveDate, to: NaiveDate) -> RevenueSummary {
    let selected: Vec<RevenueEntry> = entries
        .iter()
        .filter(|e| e.date >= from && e.date <= to)
        .cloned()
        .collect();
    summarize(&selected)
}

/// Grand totals per day.
pub fn daily_revenue(entries: &[RevenueEntry]) -> BTreeMap<NaiveDate, Decimal> {
    let mut days = BTreeMap::new();
    for entry in entries {
        let day = days.entry(entry.date).or_insert(Decimal::ZERO);
        *day = accumulate(*day, entry.totals.grand_total);
    }
    days
}

/// Grand totals per `(year, month)`.
pub fn monthly_revenue(entries: &[RevenueEntry]) -> BTreeMap<(i32, u32), Decimal> {
    let mut months = BTreeMap::new();
    for entry in entries {
        let key = (entry.date.year(), entry.date.month());
        let month = months.entry(key).or_insert(Decimal::ZERO);
        *month = accumulate(*month, entry.totals.grand_total);
    }
    months
}
