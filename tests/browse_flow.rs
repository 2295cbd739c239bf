//! End-to-end flow against the fixture-backed stores: the same sequence
//! the browse page drives, with latency disabled.

use homefinder::stores::{
    MockPropertyStore, MockSavedPropertyStore, PropertyStore, SavedPropertyStore,
};
use homefinder::{FilterSpec, SortKey, StoreError};
use std::time::Duration;

fn property_store() -> MockPropertyStore {
    MockPropertyStore::new()
        .expect("bundled fixture must parse")
        .with_latency(Duration::ZERO)
}

fn saved_store() -> MockSavedPropertyStore {
    MockSavedPropertyStore::new().with_latency(Duration::ZERO)
}

#[tokio::test]
async fn search_filters_and_orders_the_fixture() {
    let store = property_store();

    let spec = FilterSpec {
        price_min: Some(300_000.0),
        price_max: Some(700_000.0),
        ..Default::default()
    };
    let results = store.query(&spec, SortKey::PriceLow).await.unwrap();

    assert!(!results.is_empty());
    assert!(results
        .iter()
        .all(|p| p.price >= 300_000.0 && p.price <= 700_000.0));
    assert!(results.windows(2).all(|w| w[0].price <= w[1].price));
}

#[tokio::test]
async fn free_text_search_narrows_by_city() {
    let store = property_store();

    let everything = store.query(&FilterSpec::default(), SortKey::Newest).await.unwrap();
    let spec = FilterSpec::default().with_location("austin");
    let austin = store.query(&spec, SortKey::Newest).await.unwrap();

    assert!(!austin.is_empty());
    assert!(austin.len() < everything.len());
    assert!(austin.iter().all(|p| p.address.city == "Austin"));
}

#[tokio::test]
async fn changing_the_sort_key_reorders_the_same_result_set() {
    let store = property_store();
    let spec = FilterSpec {
        property_types: vec!["Condo".to_string(), "Townhouse".to_string()],
        ..Default::default()
    };

    let newest = store.query(&spec, SortKey::Newest).await.unwrap();
    let by_size = store.query(&spec, SortKey::Size).await.unwrap();

    let mut newest_ids: Vec<u64> = newest.iter().map(|p| p.id).collect();
    let mut size_ids: Vec<u64> = by_size.iter().map(|p| p.id).collect();
    newest_ids.sort_unstable();
    size_ids.sort_unstable();
    assert_eq!(newest_ids, size_ids, "sorting must never change membership");
    assert!(by_size.windows(2).all(|w| w[0].square_feet >= w[1].square_feet));
}

#[tokio::test]
async fn saved_status_decorates_query_results() {
    let properties = property_store();
    let ledger = saved_store();

    let results = properties
        .query(&FilterSpec::default(), SortKey::Newest)
        .await
        .unwrap();
    let favorite = results[0].id;
    ledger.save(favorite).await.unwrap();

    let mut decorated = Vec::new();
    for property in &results {
        decorated.push((property.id, ledger.is_saved(property.id).await.unwrap()));
    }
    assert!(decorated.iter().any(|&(id, saved)| id == favorite && saved));
    assert_eq!(decorated.iter().filter(|&&(_, saved)| saved).count(), 1);
}

#[tokio::test]
async fn saving_an_unknown_listing_still_round_trips_through_the_ledger() {
    // The ledger tracks ids, not listings; referential integrity is the
    // backend's concern.
    let ledger = saved_store();
    ledger.save(424_242).await.unwrap();
    assert!(ledger.is_saved(424_242).await.unwrap());
    ledger.remove(424_242).await.unwrap();
    assert!(matches!(
        ledger.remove(424_242).await,
        Err(StoreError::SavedNotFound { id: 424_242 })
    ));
}

#[tokio::test]
async fn detail_view_lookup_matches_the_browse_snapshot() {
    let store = property_store();
    let listed = store.list_all().await.unwrap();
    for property in &listed {
        let fetched = store.get_by_id(property.id).await.unwrap();
        assert_eq!(&fetched, property);
    }
}
