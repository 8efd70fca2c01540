use medbill::catalog::*;
use medbill::core::*;
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = CatalogConfig::from_env()
        .unwrap_or_else(|| CatalogConfig::new("http://127.0.0.1:8080/api/tax-profiles"));
    println!("Loading tax profiles from {}", config.url);

    let catalog = ProfileCatalog::new();
    let table = catalog.load(&config).await;
    println!("Source: {:?}, {} profiles", catalog.source(), table.len());

    for profile in table.iter() {
        let line = LineItemBuilder::new(1, dec!(1000))
            .exclusive(profile.clone())
            .build();
        println!(
            "  {:<10} {:<12} 1000.00 -> {}",
            profile.id,
            profile.display_name,
            compute(&line).total_amount
        );
    }

    match table.resolve("gst_28") {
        Ok(p) => println!("gst_28 available: {}", p.display_name),
        Err(e) => println!("{e}"),
    }
}
