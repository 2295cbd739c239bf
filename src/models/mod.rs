use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Street address of a listing. Every field may be empty for sparse records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub zip: String,
}

/// Map position of a listing. Defaults to (0, 0) when the source has no
/// geodata for the property.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

/// Core property listing model.
///
/// `id` is the sole identity key; everything else may be absent in the
/// source record and falls back to a default on deserialization. The
/// search core only ever reads properties, it never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub address: Address,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: f64,
    #[serde(default)]
    pub square_feet: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub coordinates: Coordinates,
    #[serde(default = "epoch")]
    pub listing_date: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

/// A user bookmark referencing a property by id. `id` is the ledger's own
/// record key, separate from `property_id`; at most one active record
/// exists per `property_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedProperty {
    pub id: u64,
    pub property_id: u64,
    pub saved_date: DateTime<Utc>,
}
