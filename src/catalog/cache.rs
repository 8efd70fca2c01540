use std::future::Future;

use tokio::sync::OnceCell;

use super::client::{CatalogConfig, CatalogError, fetch_profiles};
use crate::core::{TaxProfile, TaxProfileTable, validate_profile};

/// Where the loaded table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched from the external catalog.
    Remote,
    /// Built-in GST table, installed after a failed fetch.
    Builtin,
}

/// Session-wide tax profile table, loaded at most once.
///
/// The first [`load`](Self::load) fetches the catalog; concurrent callers wait
/// for that single fetch. Any failure installs [`TaxProfileTable::builtin`]
/// so billing keeps working offline. Later calls never touch the network.
#[derive(Debug, Default)]
pub struct ProfileCatalog {
    cell: OnceCell<(TaxProfileTable, CatalogSource)>,
}

impl ProfileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog that is already loaded with `table`.
    pub fn preloaded(table: TaxProfileTable) -> Self {
        Self {
            cell: OnceCell::new_with(Some((table, CatalogSource::Remote))),
        }
    }

    /// Fetch from `config` on first use, falling back to the built-in table.
    pub async fn load(&self, config: &CatalogConfig) -> &TaxProfileTable {
        self.load_with(|| fetch_profiles(config)).await
    }

    /// Like [`load`](Self::load) with a caller-supplied fetch.
    pub async fn load_with<F, Fut>(&self, fetch: F) -> &TaxProfileTable
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<TaxProfile>, CatalogError>>,
    {
        let (table, _) = self
            .cell
            .get_or_init(|| async move {
                match fetch().await {
                    Ok(profiles) if !profiles.is_empty() => {
                        for profile in &profiles {
                            for finding in validate_profile(profile) {
                                tracing::warn!(profile = %profile.id, %finding, "inconsistent tax profile");
                            }
                        }
                        let table = TaxProfileTable::from_profiles(profiles);
                        tracing::info!(profiles = table.len(), "loaded tax profile catalog");
                        (table, CatalogSource::Remote)
                    }
                    Ok(_) => fallback(&CatalogError::Empty),
                    Err(e) => fallback(&e),
                }
            })
            .await;
        table
    }

    /// The loaded table, or `None` before the first load finished.
    pub fn table(&self) -> Option<&TaxProfileTable> {
        self.cell.get().map(|(table, _)| table)
    }

    pub fn source(&self) -> Option<CatalogSource> {
        self.cell.get().map(|(_, source)| *source)
    }
}

fn fallback(error: &CatalogError) -> (TaxProfileTable, CatalogSource) {
    tracing::warn!(%error, "tax profile catalog unavailable, using built-in GST table");
    (TaxProfileTable::builtin(), CatalogSource::Builtin)
}
