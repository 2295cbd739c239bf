//! Pure filter and sort core shared by every property store.
//!
//! Both the remote-backed and fixture-backed stores must produce results
//! equivalent to running these functions over the same snapshot, so all
//! predicate and ordering logic lives here and nowhere else. Nothing in
//! this module does I/O or holds state.

mod types;

pub use types::{FilterSpec, SortKey};

use crate::models::Property;

/// Filters `properties` by `spec`, then orders the survivors by `sort`.
///
/// Filtering always happens before sorting and each call re-derives the
/// order from the filtered set, so ties break on the input's original
/// relative order regardless of how results were sorted previously.
pub fn search(properties: &[Property], spec: &FilterSpec, sort: SortKey) -> Vec<Property> {
    let mut results: Vec<Property> = if spec.is_empty() {
        properties.to_vec()
    } else {
        properties
            .iter()
            .filter(|property| matches(property, spec))
            .cloned()
            .collect()
    };
    sort_properties(&mut results, sort);
    results
}

/// True when the property satisfies every supplied constraint.
///
/// Unset constraints never restrict; `property_types` matches any member;
/// the free-text location matches the city, state, or title.
pub fn matches(property: &Property, spec: &FilterSpec) -> bool {
    if let Some(min) = spec.price_min {
        if property.price < min {
            return false;
        }
    }
    if let Some(max) = spec.price_max {
        if property.price > max {
            return false;
        }
    }
    if !spec.property_types.is_empty()
        && !spec
            .property_types
            .iter()
            .any(|t| t == &property.property_type)
    {
        return false;
    }
    if let Some(min) = spec.bedrooms_min {
        if property.bedrooms < min {
            return false;
        }
    }
    if let Some(min) = spec.bathrooms_min {
        if property.bathrooms < min {
            return false;
        }
    }
    if let Some(min) = spec.square_feet_min {
        if property.square_feet < min {
            return false;
        }
    }
    if spec.has_location() {
        let needle = spec.location.as_deref().unwrap_or_default().trim();
        if !contains_ignore_case(&property.address.city, needle)
            && !contains_ignore_case(&property.address.state, needle)
            && !contains_ignore_case(&property.title, needle)
        {
            return false;
        }
    }
    true
}

/// Stable in-place sort by the comparator the key names. Ties keep their
/// relative order from the slice as given.
pub fn sort_properties(properties: &mut [Property], sort: SortKey) {
    match sort {
        SortKey::Newest => properties.sort_by(|a, b| b.listing_date.cmp(&a.listing_date)),
        SortKey::PriceLow => properties.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceHigh => properties.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Size => properties.sort_by(|a, b| b.square_feet.cmp(&a.square_feet)),
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, Coordinates, Property};
    use chrono::{TimeZone, Utc};

    fn listing(id: u64, price: f64, property_type: &str, bedrooms: u32, city: &str) -> Property {
        Property {
            id,
            title: format!("Listing {}", id),
            description: String::new(),
            property_type: property_type.to_string(),
            price,
            address: Address {
                street: String::new(),
                city: city.to_string(),
                state: "TX".to_string(),
                zip: String::new(),
            },
            bedrooms,
            bathrooms: 2.0,
            square_feet: 1500,
            amenities: vec![],
            images: vec![],
            coordinates: Coordinates::default(),
            listing_date: Utc
                .with_ymd_and_hms(2024, 1, id as u32 % 28 + 1, 0, 0, 0)
                .unwrap(),
        }
    }

    fn sample() -> Vec<Property> {
        vec![
            listing(1, 200_000.0, "Condo", 2, "Austin"),
            listing(2, 450_000.0, "Single Family", 4, "Dallas"),
            listing(3, 300_000.0, "Condo", 3, "Austin"),
        ]
    }

    #[test]
    fn empty_spec_is_a_no_op() {
        let properties = sample();
        let spec = FilterSpec::default();
        let ids: Vec<u64> = properties
            .iter()
            .filter(|p| matches(p, &spec))
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2, 3]);

        let results = search(&properties, &spec, SortKey::PriceLow);
        assert_eq!(results.len(), properties.len());
    }

    #[test]
    fn constraints_compose_conjunctively() {
        let properties = sample();
        let spec = FilterSpec {
            price_min: Some(250_000.0),
            property_types: vec!["Condo".to_string()],
            ..Default::default()
        };
        let results = search(&properties, &spec, SortKey::Newest);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 3);

        // Same result as intersecting the constraints applied one at a time.
        let by_price: Vec<u64> = properties
            .iter()
            .filter(|p| {
                matches(
                    p,
                    &FilterSpec {
                        price_min: Some(250_000.0),
                        ..Default::default()
                    },
                )
            })
            .map(|p| p.id)
            .collect();
        let by_type: Vec<u64> = properties
            .iter()
            .filter(|p| {
                matches(
                    p,
                    &FilterSpec {
                        property_types: vec!["Condo".to_string()],
                        ..Default::default()
                    },
                )
            })
            .map(|p| p.id)
            .collect();
        let intersection: Vec<u64> = by_price
            .iter()
            .copied()
            .filter(|id| by_type.contains(id))
            .collect();
        assert_eq!(intersection, vec![3]);
    }

    #[test]
    fn property_types_match_any_member() {
        let properties = sample();
        let spec = FilterSpec {
            property_types: vec!["Townhouse".to_string(), "Single Family".to_string()],
            ..Default::default()
        };
        let ids: Vec<u64> = search(&properties, &spec, SortKey::Newest)
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn location_matches_city_state_or_title_case_insensitively() {
        let properties = sample();

        let by_city = FilterSpec {
            location: Some("austin".to_string()),
            ..Default::default()
        };
        assert!(matches(&properties[0], &by_city));
        assert!(!matches(&properties[1], &by_city));

        let by_state = FilterSpec {
            location: Some("tx".to_string()),
            ..Default::default()
        };
        assert!(properties.iter().all(|p| matches(p, &by_state)));

        let by_title = FilterSpec {
            location: Some("listing 2".to_string()),
            ..Default::default()
        };
        assert!(matches(&properties[1], &by_title));
        assert!(!matches(&properties[0], &by_title));
    }

    #[test]
    fn blank_location_is_no_constraint() {
        let spec = FilterSpec {
            location: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(spec.is_empty());
        assert!(matches(&sample()[0], &spec));
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let properties = sample();
        let spec = FilterSpec {
            price_min: Some(200_000.0),
            price_max: Some(300_000.0),
            ..Default::default()
        };
        let ids: Vec<u64> = properties
            .iter()
            .filter(|p| matches(p, &spec))
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn sort_orders_match_their_keys() {
        let properties = sample();

        let ids = |sort: SortKey| -> Vec<u64> {
            search(&properties, &FilterSpec::default(), sort)
                .iter()
                .map(|p| p.id)
                .collect()
        };

        assert_eq!(ids(SortKey::Newest), vec![3, 2, 1]);
        assert_eq!(ids(SortKey::PriceLow), vec![1, 3, 2]);
        assert_eq!(ids(SortKey::PriceHigh), vec![2, 3, 1]);
    }

    #[test]
    fn sorting_is_stable_on_ties() {
        let mut a = listing(10, 350_000.0, "Condo", 2, "Austin");
        let mut b = listing(11, 350_000.0, "Condo", 2, "Dallas");
        a.square_feet = 900;
        b.square_feet = 900;
        a.listing_date = b.listing_date;
        let properties = vec![a, b];

        for sort in [
            SortKey::Newest,
            SortKey::PriceLow,
            SortKey::PriceHigh,
            SortKey::Size,
        ] {
            let ids: Vec<u64> = search(&properties, &FilterSpec::default(), sort)
                .iter()
                .map(|p| p.id)
                .collect();
            assert_eq!(ids, vec![10, 11], "ties must keep input order for {:?}", sort);
        }
    }

    #[test]
    fn search_is_idempotent() {
        let properties = sample();
        let spec = FilterSpec {
            bedrooms_min: Some(2),
            ..Default::default()
        };
        let first = search(&properties, &spec, SortKey::PriceHigh);
        let second = search(&properties, &spec, SortKey::PriceHigh);
        assert_eq!(first, second);
    }

    #[test]
    fn resort_derives_order_from_the_filtered_set() {
        let properties = sample();
        let spec = FilterSpec::default();
        let by_price = search(&properties, &spec, SortKey::PriceLow);
        // A later sort with a different key over the same input must not
        // depend on the earlier ordering.
        let newest_from_original = search(&properties, &spec, SortKey::Newest);
        let newest_from_sorted = search(&by_price, &spec, SortKey::Newest);
        let ids: Vec<u64> = newest_from_original.iter().map(|p| p.id).collect();
        let resorted: Vec<u64> = newest_from_sorted.iter().map(|p| p.id).collect();
        assert_eq!(ids, resorted);
    }

    #[test]
    fn malformed_numeric_strings_become_no_constraint() {
        let spec: FilterSpec = serde_json::from_value(serde_json::json!({
            "price_min": "not-a-number",
            "price_max": "450000",
            "bedrooms_min": "two",
            "square_feet_min": 1000,
        }))
        .unwrap();
        assert_eq!(spec.price_min, None);
        assert_eq!(spec.price_max, Some(450_000.0));
        assert_eq!(spec.bedrooms_min, None);
        assert_eq!(spec.square_feet_min, Some(1000));
    }

    #[test]
    fn unknown_sort_names_fall_back_to_newest() {
        assert_eq!(SortKey::parse("price-low"), SortKey::PriceLow);
        assert_eq!(SortKey::parse("oldest"), SortKey::Newest);
        let key: SortKey = serde_json::from_value(serde_json::json!("size")).unwrap();
        assert_eq!(key, SortKey::Size);
        let fallback: SortKey = serde_json::from_value(serde_json::json!("shiniest")).unwrap();
        assert_eq!(fallback, SortKey::Newest);
    }
}
