//! Billing calculation core: tax profiles, line items, and bill totals.
//!
//! Everything here is pure and synchronous. [`compute`] and [`aggregate`]
//! accept any input without failing; invalid numbers contribute zero.

mod aggregate;
mod builder;
mod calc;
pub mod coerce;
mod error;
mod numbering;
mod profiles;
mod types;
mod validation;

pub use aggregate::*;
pub use builder::*;
pub use calc::*;
pub use error::*;
pub use numbering::*;
pub use profiles::*;
pub use types::*;
pub use validation::*;
