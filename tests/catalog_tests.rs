//! Catalog loading against a throwaway local HTTP server.
//!
//! Run with: `cargo test --features catalog --test catalog_tests`

#![cfg(feature = "catalog")]

use std::time::Duration;

use medbill::catalog::*;
use medbill::core::*;
use rust_decimal_macros::dec;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const CATALOG_JSON: &str = r#"[
    {"id":"gst_18","displayName":"GST 18%","totalRate":"18",
     "components":[{"name":"CGST","rate":"9"},{"name":"SGST","rate":"9"}]},
    {"id":"gst_28","displayName":"GST 28%","totalRate":28,
     "components":[{"name":"CGST","rate":14},{"name":"SGST","rate":14}]}
]"#;

/// Serve exactly one HTTP response and return the base URL.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/api/tax-profiles")
}

/// A URL on a port nothing listens on.
async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/tax-profiles")
}

#[tokio::test]
async fn fetch_parses_remote_catalog() {
    let url = serve_once("200 OK", CATALOG_JSON).await;
    let profiles = fetch_profiles(&CatalogConfig::new(url)).await.unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[1].id, "gst_28");
    assert_eq!(profiles[1].components[0].rate, dec!(14));
}

#[tokio::test]
async fn fetch_reports_http_status() {
    let url = serve_once("503 Service Unavailable", r#"{"error":"down"}"#).await;
    let err = fetch_profiles(&CatalogConfig::new(url)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Http { status: 503, .. }));
}

#[tokio::test]
async fn fetch_reports_empty_catalog() {
    let url = serve_once("200 OK", "[]").await;
    let err = fetch_profiles(&CatalogConfig::new(url)).await.unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[tokio::test]
async fn catalog_uses_remote_table() {
    let url = serve_once("200 OK", CATALOG_JSON).await;
    let catalog = ProfileCatalog::new();
    let table = catalog.load(&CatalogConfig::new(url)).await;

    assert_eq!(catalog.source(), Some(CatalogSource::Remote));
    assert!(table.get("gst_5").is_none());

    let gst28 = table.resolve("gst_28").unwrap().clone();
    let r = compute(&LineItemBuilder::new(1, dec!(100)).exclusive(gst28).build());
    assert_eq!(r.total_amount, dec!(128.00));
}

#[tokio::test]
async fn unreachable_catalog_falls_back_to_builtin() {
    let config = CatalogConfig::new(closed_port_url().await).timeout(Duration::from_secs(2));
    let catalog = ProfileCatalog::new();
    let table = catalog.load(&config).await;

    assert_eq!(catalog.source(), Some(CatalogSource::Builtin));
    for id in ["gst_5", "gst_12", "gst_18"] {
        assert!(table.get(id).is_some(), "missing {id}");
    }
}

#[tokio::test]
async fn malformed_catalog_falls_back_to_builtin() {
    let url = serve_once("200 OK", "<html>maintenance</html>").await;
    let catalog = ProfileCatalog::new();
    catalog.load(&CatalogConfig::new(url)).await;
    assert_eq!(catalog.source(), Some(CatalogSource::Builtin));
}

#[tokio::test]
async fn second_load_does_not_refetch() {
    // The server only answers once; a second fetch would fail and fall back.
    let url = serve_once("200 OK", CATALOG_JSON).await;
    let config = CatalogConfig::new(url);
    let catalog = ProfileCatalog::new();
    catalog.load(&config).await;
    let table = catalog.load(&config).await;
    assert_eq!(catalog.source(), Some(CatalogSource::Remote));
    assert!(table.get("gst_28").is_some());
}
