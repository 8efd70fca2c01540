//! HTTP client for the external tax profile catalog.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::core::{TaxComponent, TaxProfile};

/// Environment variable holding the catalog URL.
pub const ENV_CATALOG_URL: &str = "MEDBILL_TAX_CATALOG_URL";
/// Environment variable holding the request timeout in seconds.
pub const ENV_CATALOG_TIMEOUT: &str = "MEDBILL_TAX_CATALOG_TIMEOUT_SECS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Error loading the tax profile catalog.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    /// Connection, TLS or timeout failure.
    #[error("catalog network error: {0}")]
    Network(String),
    /// The catalog answered with a non-success status.
    #[error("catalog returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The response body was not a valid profile list.
    #[error("catalog parse error: {0}")]
    Parse(String),
    /// The catalog returned no profiles.
    #[error("catalog returned no tax profiles")]
    Empty,
}

/// Where and how to fetch the catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub url: String,
    pub timeout: Duration,
    pub bearer_token: Option<String>,
}

impl CatalogConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            bearer_token: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Read `MEDBILL_TAX_CATALOG_URL` and `MEDBILL_TAX_CATALOG_TIMEOUT_SECS`.
    ///
    /// Returns `None` when no URL is configured. An unparsable timeout keeps
    /// the default of 10 seconds.
    pub fn from_env() -> Option<Self> {
        let url = std::env::var(ENV_CATALOG_URL).ok()?;
        if url.trim().is_empty() {
            return None;
        }
        let timeout = std::env::var(ENV_CATALOG_TIMEOUT)
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);
        Some(Self::new(url.trim()).timeout(timeout))
    }
}

/// Catalog ids are strings in newer deployments and integers in older ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl From<WireId> for String {
    fn from(id: WireId) -> Self {
        match id {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireProfile {
    id: WireId,
    display_name: String,
    total_rate: Decimal,
    #[serde(default)]
    components: Vec<WireComponent>,
}

#[derive(Debug, Deserialize)]
struct WireComponent {
    name: String,
    rate: Decimal,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireCatalog {
    List(Vec<WireProfile>),
    Envelope { profiles: Vec<WireProfile> },
}

impl From<WireProfile> for TaxProfile {
    fn from(wire: WireProfile) -> Self {
        TaxProfile {
            id: wire.id.into(),
            display_name: wire.display_name,
            total_rate: wire.total_rate,
            components: wire
                .components
                .into_iter()
                .map(|c| TaxComponent::new(c.name, c.rate))
                .collect(),
        }
    }
}

/// Parse a catalog body: a JSON array of profiles, or `{"profiles": [...]}`.
pub fn parse_profiles(body: &str) -> Result<Vec<TaxProfile>, CatalogError> {
    let catalog: WireCatalog =
        serde_json::from_str(body).map_err(|e| CatalogError::Parse(e.to_string()))?;
    let wire = match catalog {
        WireCatalog::List(list) => list,
        WireCatalog::Envelope { profiles } => profiles,
    };
    Ok(wire.into_iter().map(TaxProfile::from).collect())
}

/// Fetch and parse the catalog.
///
/// # Errors
///
/// `Network` on connection issues or timeout, `Http` on a non-success
/// status, `Parse` on an unexpected body, `Empty` if no profiles came back.
pub async fn fetch_profiles(config: &CatalogConfig) -> Result<Vec<TaxProfile>, CatalogError> {
    let client = reqwest::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    let mut req = client.get(&config.url);
    if let Some(token) = &config.bearer_token {
        req = req.bearer_auth(token);
    }

    let resp = req
        .send()
        .await
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| CatalogError::Network(e.to_string()))?;

    if !status.is_success() {
        return Err(CatalogError::Http {
            status: status.as_u16(),
            body,
        });
    }

    let profiles = parse_profiles(&body)?;
    if profiles.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_array() {
        let body = r#"[
            {"id":"gst_18","displayName":"GST 18%","totalRate":18,
             "components":[{"name":"CGST","rate":9},{"name":"SGST","rate":"9"}]}
        ]"#;
        let profiles = parse_profiles(body).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].id, "gst_18");
        assert_eq!(profiles[0].total_rate, dec!(18));
        assert_eq!(profiles[0].components[1].rate, dec!(9));
    }

    #[test]
    fn parse_envelope_and_numeric_id() {
        let body = r#"{"profiles":[{"id":7,"displayName":"GST 5%","totalRate":"5",
            "components":[{"name":"CGST","rate":2.5},{"name":"SGST","rate":2.5}]}]}"#;
        let profiles = parse_profiles(body).unwrap();
        assert_eq!(profiles[0].id, "7");
        assert_eq!(profiles[0].components[0].rate, dec!(2.5));
    }

    #[test]
    fn missing_components_is_empty_list() {
        let body = r#"[{"id":"gst_0","displayName":"GST 0%","totalRate":0}]"#;
        let profiles = parse_profiles(body).unwrap();
        assert!(profiles[0].components.is_empty());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(matches!(parse_profiles("<html>"), Err(CatalogError::Parse(_))));
        assert!(matches!(
            parse_profiles(r#"[{"id":"x"}]"#),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn config_builder() {
        let cfg = CatalogConfig::new("https://billing.example/api/tax-profiles")
            .timeout(Duration::from_secs(3))
            .bearer_token("t0k");
        assert_eq!(cfg.timeout, Duration::from_secs(3));
        assert_eq!(cfg.bearer_token.as_deref(), Some("t0k"));
    }
}
