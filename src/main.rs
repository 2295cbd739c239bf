use homefinder::stores::{
    FetchPolicy, MockPropertyStore, MockSavedPropertyStore, PropertyStore, RemotePropertyStore,
    RemoteSavedPropertyStore, SavedPropertyStore,
};
use homefinder::{FilterSpec, SortKey};
use std::env;
use std::sync::Arc;
use tracing::{info, warn, Level};
use tracing_subscriber;

fn stores_from_env() -> anyhow::Result<(Arc<dyn PropertyStore>, Arc<dyn SavedPropertyStore>)> {
    match env::var("HOMEFINDER_BASE_URL") {
        Ok(base_url) => {
            info!("Using remote backend at {}", base_url);
            let policy = match env::var("HOMEFINDER_FAIL_OPEN").as_deref() {
                Ok("0") | Ok("false") => FetchPolicy::Propagate,
                _ => FetchPolicy::FailOpen,
            };
            let properties = RemotePropertyStore::new(&base_url)?.with_policy(policy);
            let saved = RemoteSavedPropertyStore::new(&base_url)?;
            Ok((Arc::new(properties), Arc::new(saved)))
        }
        Err(_) => {
            info!("No HOMEFINDER_BASE_URL set, using bundled fixture");
            Ok((
                Arc::new(MockPropertyStore::new()?),
                Arc::new(MockSavedPropertyStore::new()),
            ))
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    info!("🏠 Homefinder - Property Search");
    info!("================================");
    info!("");

    let (properties, saved) = stores_from_env()?;

    // Browse-style query: search text plus filters, driven by env vars so
    // the demo can be pointed at different slices of the data.
    let spec = FilterSpec {
        price_max: env::var("HOMEFINDER_PRICE_MAX")
            .ok()
            .and_then(|v| v.parse().ok()),
        location: env::var("HOMEFINDER_SEARCH").ok(),
        ..Default::default()
    };
    let sort = SortKey::parse(
        env::var("HOMEFINDER_SORT")
            .unwrap_or_default()
            .as_str(),
    );

    info!("Running query (sort: {})...", sort.as_str());
    let results = properties.query(&spec, sort).await?;
    info!("\n✅ Found {} properties\n", results.len());

    // Bookmark the top result so the saved list has something in it.
    if let Some(top) = results.first() {
        match saved.save(top.id).await {
            Ok(record) => info!("Saved top result as record {}", record.id),
            Err(err) => warn!("Could not save top result: {}", err),
        }
    }

    for (i, property) in results.iter().enumerate() {
        let saved_marker = if saved.is_saved(property.id).await? {
            " ★"
        } else {
            ""
        };
        println!(
            "{}. {} (${:.0}){}",
            i + 1,
            property.title,
            property.price,
            saved_marker
        );
        println!(
            "   {} bed, {} bath, {} sqft {}",
            property.bedrooms, property.bathrooms, property.square_feet, property.property_type
        );
        println!(
            "   {}, {} {}",
            property.address.city, property.address.state, property.address.zip
        );
        if !property.amenities.is_empty() {
            println!("   Amenities: {}", property.amenities.join(", "));
        }
        println!();
    }

    // Save results to JSON file
    let json = serde_json::to_string_pretty(&results)?;
    tokio::fs::write("query_results.json", json).await?;
    info!("💾 Saved query results to query_results.json");

    Ok(())
}
