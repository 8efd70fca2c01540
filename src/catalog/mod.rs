//! External tax profile catalog with an offline fallback.
//!
//! The catalog is a read-only JSON list of tax profiles served over HTTP. It
//! is fetched once per session and cached; when the fetch fails the built-in
//! GST table is used instead.
//!
//! # Example
//!
//! ```ignore
//! use medbill::catalog::*;
//!
//! let catalog = ProfileCatalog::new();
//! let config = CatalogConfig::from_env()
//!     .unwrap_or_else(|| CatalogConfig::new("http://localhost:8080/api/tax-profiles"));
//! let table = catalog.load(&config).await;
//! let gst = table.resolve("gst_18")?;
//! ```

mod cache;
mod client;

pub use cache::{CatalogSource, ProfileCatalog};
pub use client::{
    CatalogConfig, CatalogError, ENV_CATALOG_TIMEOUT, ENV_CATALOG_URL, fetch_profiles,
    parse_profiles,
};
