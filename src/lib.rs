//! # medbill
//!
//! Line-item billing calculator for clinic invoices and cash memos:
//! GST tax in inclusive, exclusive or untaxed mode, line and bill discounts,
//! and tax breakdown rollups.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! The calculation functions are pure and total: form input that does not
//! parse contributes zero rather than failing.
//!
//! ## Quick Start
//!
//! ```rust
//! use medbill::core::*;
//! use rust_decimal_macros::dec;
//!
//! let gst18 = TaxProfileTable::builtin().resolve("gst_18").unwrap().clone();
//! let lines = vec![
//!     LineItemBuilder::new(2, dec!(500)).exclusive(gst18.clone()).build(),
//!     LineItemBuilder::new(2, dec!(500)).inclusive(gst18).build(),
//! ];
//!
//! let totals = aggregate(&lines, dec!(5000), DiscountType::Amount);
//! assert_eq!(totals.subtotal, dec!(2180.00));
//! assert_eq!(totals.tax_amount("CGST"), dec!(166.27));
//! assert_eq!(totals.grand_total, dec!(0));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Tax profiles, line calculator, aggregator, bills, numbering |
//! | `catalog` | Load tax profiles from an HTTP catalog with offline fallback |
//! | `revenue` | Daily/monthly revenue rollups for dashboards |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "catalog")]
pub mod catalog;

#[cfg(feature = "revenue")]
pub mod revenue;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
