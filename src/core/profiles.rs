//! Tax profile lookup table.
//!
//! The table is populated once per session (usually from the external catalog)
//! and is read-only afterwards. [`TaxProfileTable::builtin`] is the offline
//! fallback with the common GST slabs.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::coerce;
use super::error::BillingError;
use super::types::{TaxComponent, TaxProfile};

impl TaxProfile {
    /// Intra-state GST: the rate split into equal CGST and SGST halves.
    pub fn intra_state(id: impl Into<String>, rate: Decimal) -> Self {
        let half = coerce::div(rate, dec!(2));
        Self {
            id: id.into(),
            display_name: format!("GST {}%", rate.normalize()),
            total_rate: rate,
            components: vec![
                TaxComponent::new("CGST", half),
                TaxComponent::new("SGST", half),
            ],
        }
    }

    /// Inter-state GST: a single IGST component carrying the full rate.
    pub fn inter_state(id: impl Into<String>, rate: Decimal) -> Self {
        Self {
            id: id.into(),
            display_name: format!("IGST {}%", rate.normalize()),
            total_rate: rate,
            components: vec![TaxComponent::new("IGST", rate)],
        }
    }

    /// Sum of the component rates. Not used by the calculator.
    pub fn component_rate_sum(&self) -> Decimal {
        self.components
            .iter()
            .fold(Decimal::ZERO, |acc, c| coerce::accumulate(acc, c.rate))
    }
}

/// In-memory tax profiles keyed by id, listed in insertion order.
#[derive(Debug, Clone, Default)]
pub struct TaxProfileTable {
    profiles: Vec<TaxProfile>,
    index: HashMap<String, usize>,
}

impl TaxProfileTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a list; later duplicates replace earlier ones.
    pub fn from_profiles(profiles: impl IntoIterator<Item = TaxProfile>) -> Self {
        let mut table = Self::new();
        for profile in profiles {
            table.insert(profile);
        }
        table
    }

    /// Fixed fallback table used when the catalog cannot be loaded.
    pub fn builtin() -> Self {
        Self::from_profiles([
            TaxProfile {
                id: "gst_0".into(),
                display_name: "GST 0%".into(),
                total_rate: Decimal::ZERO,
                components: Vec::new(),
            },
            TaxProfile::intra_state("gst_5", dec!(5)),
            TaxProfile::intra_state("gst_12", dec!(12)),
            TaxProfile::intra_state("gst_18", dec!(18)),
            TaxProfile::inter_state("igst_5", dec!(5)),
            TaxProfile::inter_state("igst_12", dec!(12)),
            TaxProfile::inter_state("igst_18", dec!(18)),
        ])
    }

    /// Insert or replace a profile by id.
    pub fn insert(&mut self, profile: TaxProfile) {
        match self.index.get(&profile.id) {
            Some(&pos) => self.profiles[pos] = profile,
            None => {
                self.index.insert(profile.id.clone(), self.profiles.len());
                self.profiles.push(profile);
            }
        }
    }

    /// Look up a profile by id.
    pub fn resolve(&self, id: &str) -> Result<&TaxProfile, BillingError> {
        self.get(id)
            .ok_or_else(|| BillingError::ProfileNotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<&TaxProfile> {
        self.index.get(id).map(|&pos| &self.profiles[pos])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxProfile> {
        self.profiles.iter()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
