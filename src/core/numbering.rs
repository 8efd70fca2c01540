use chrono::{Datelike, NaiveDate};

use super::error::BillingError;
use super::types::DocumentKind;

/// Sequential bill number generator.
///
/// Numbers have the form `{prefix}{year}-{sequential}`, e.g. "INV-2024-001"
/// or "CM-2024-017". Invoices and cash memos each keep their own sequence.
#[derive(Debug, Clone)]
pub struct BillNumberSequence {
    prefix: String,
    year: i32,
    next_number: u64,
    zero_pad: usize,
}

impl BillNumberSequence {
    /// Create a new sequence starting at 1.
    pub fn new(prefix: impl Into<String>, year: i32) -> Self {
        Self::starting_at(prefix, year, 1)
    }

    /// Sequence using the default prefix for a document kind.
    pub fn for_kind(kind: DocumentKind, year: i32) -> Self {
        Self::new(kind.prefix(), year)
    }

    /// Continue an existing sequence, e.g. after loading the last issued number.
    pub fn starting_at(prefix: impl Into<String>, year: i32, next_number: u64) -> Self {
        Self {
            prefix: prefix.into(),
            year,
            next_number,
            zero_pad: 3,
        }
    }

    /// Set zero-padding width (default: 3, so "001").
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    pub fn next_number(&mut self) -> String {
        let formatted = self.format(self.next_number);
        self.next_number += 1;
        formatted
    }

    /// Next number for a bill dated `date`. A later year restarts the count at 1.
    pub fn next_for_date(&mut self, date: NaiveDate) -> String {
        if date.year() > self.year {
            tracing::debug!(from = self.year, to = date.year(), prefix = %self.prefix, "bill numbering rolled over");
            self.year = date.year();
            self.next_number = 1;
        }
        self.next_number()
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.format(self.next_number)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    fn format(&self, num: u64) -> String {
        format!(
            "{}{}-{:0>width$}",
            self.prefix,
            self.year,
            num,
            width = self.zero_pad
        )
    }
}

/// Split a number like "INV-2024-042" into prefix, year and sequence.
pub fn parse_number(number: &str) -> Result<(String, i32, u64), BillingError> {
    let (head, seq) = number
        .rsplit_once('-')
        .ok_or_else(|| BillingError::Numbering(format!("'{number}' has no sequence part")))?;
    let seq: u64 = seq
        .parse()
        .map_err(|_| BillingError::Numbering(format!("'{number}' has a non-numeric sequence")))?;

    if head.len() < 4 || !head.is_char_boundary(head.len() - 4) {
        return Err(BillingError::Numbering(format!("'{number}' has no year")));
    }
    let (prefix, year) = head.split_at(head.len() - 4);
    let year: i32 = year
        .parse()
        .map_err(|_| BillingError::Numbering(format!("'{number}' has an invalid year")))?;

    Ok((prefix.to_string(), year, seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_numbering() {
        let mut seq = BillNumberSequence::for_kind(DocumentKind::Invoice, 2024);
        assert_eq!(seq.next_number(), "INV-2024-001");
        assert_eq!(seq.next_number(), "INV-2024-002");
    }

    #[test]
    fn cash_memo_prefix() {
        let mut seq = BillNumberSequence::for_kind(DocumentKind::CashMemo, 2024);
        assert_eq!(seq.next_number(), "CM-2024-001");
    }

    #[test]
    fn peek_does_not_consume() {
        let mut seq = BillNumberSequence::new("INV-", 2024);
        assert_eq!(seq.peek(), "INV-2024-001");
        assert_eq!(seq.next_number(), "INV-2024-001");
        assert_eq!(seq.peek(), "INV-2024-002");
    }

    #[test]
    fn resume_with_padding() {
        let mut seq = BillNumberSequence::starting_at("CM-", 2024, 42).with_padding(5);
        assert_eq!(seq.next_number(), "CM-2024-00042");
    }

    #[test]
    fn year_rollover_by_date() {
        let mut seq = BillNumberSequence::new("INV-", 2024);
        seq.next_number();
        let dec_2024 = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(seq.next_for_date(dec_2024), "INV-2024-002");
        let jan_2025 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(seq.next_for_date(jan_2025), "INV-2025-001");
        assert_eq!(seq.year(), 2025);
        // Backdated bills stay in the current year
        assert_eq!(seq.next_for_date(dec_2024), "INV-2025-002");
    }

    #[test]
    fn parse_round_trip() {
        let (prefix, year, seq) = parse_number("INV-2024-042").unwrap();
        assert_eq!(prefix, "INV-");
        assert_eq!(year, 2024);
        assert_eq!(seq, 42);
    }

    #[test]
    fn parse_rejects_malformed() {
        assert!(parse_number("INV2024").is_err());
        assert!(parse_number("INV-2024-abc").is_err());
        assert!(parse_number("-7").is_err());
        assert!(parse_number("INV-20x4-001").is_err());
    }
}
