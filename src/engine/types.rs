use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Search constraints for a property query.
///
/// Every field is optional; an absent field imposes no restriction, so the
/// default spec matches everything. Constraints compose with AND across
/// fields and OR within `property_types`. All numeric bounds are inclusive.
///
/// Numeric fields deserialize leniently: a value like `"250000"` parses as
/// a number, while a malformed string such as `"abc"` degrades to no
/// constraint instead of failing the whole query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_max: Option<f64>,
    /// Match-any set of property types; empty means no constraint.
    #[serde(default)]
    pub property_types: Vec<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub bedrooms_min: Option<u32>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub bathrooms_min: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub square_feet_min: Option<u32>,
    /// Free-text search, matched case-insensitively as a substring of the
    /// city, state, or title.
    #[serde(default)]
    pub location: Option<String>,
}

impl FilterSpec {
    /// True when no constraint is set, i.e. filtering is a no-op.
    pub fn is_empty(&self) -> bool {
        self.price_min.is_none()
            && self.price_max.is_none()
            && self.property_types.is_empty()
            && self.bedrooms_min.is_none()
            && self.bathrooms_min.is_none()
            && self.square_feet_min.is_none()
            && !self.has_location()
    }

    pub(crate) fn has_location(&self) -> bool {
        self.location
            .as_deref()
            .map(|l| !l.trim().is_empty())
            .unwrap_or(false)
    }

    /// Returns a copy with the free-text location replaced, the way the
    /// browse page folds its search box into the active filters.
    pub fn with_location(&self, location: impl Into<String>) -> Self {
        let mut spec = self.clone();
        spec.location = Some(location.into());
        spec
    }
}

/// Named ordering applied to a filtered result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SortKey {
    /// Most recent listing date first.
    #[default]
    #[serde(rename = "newest")]
    Newest,
    /// Cheapest first.
    #[serde(rename = "price-low")]
    PriceLow,
    /// Most expensive first.
    #[serde(rename = "price-high")]
    PriceHigh,
    /// Largest square footage first.
    #[serde(rename = "size")]
    Size,
}

impl SortKey {
    /// Parses a sort key name, falling back to the default ordering for
    /// anything unrecognized.
    pub fn parse(value: &str) -> Self {
        match value {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "size" => SortKey::Size,
            _ => SortKey::Newest,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Size => "size",
        }
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(SortKey::parse(&name))
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }))
}
