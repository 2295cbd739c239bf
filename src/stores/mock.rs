use crate::engine::{self, FilterSpec, SortKey};
use crate::error::{Result, StoreError};
use crate::models::{Property, SavedProperty};
use crate::stores::traits::{PropertyStore, SavedPropertyStore};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Bundled listing fixture used when no backend is configured.
const PROPERTY_FIXTURE: &str = include_str!("../../data/properties.json");

/// Delay applied to each mock call so the UI exercises its loading states
/// the same way it would against the real backend.
const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

/// Fixture-backed property repository.
///
/// Loads the bundled JSON fixture once at construction and answers every
/// query from that snapshot, running the shared filter/sort engine locally.
pub struct MockPropertyStore {
    properties: Vec<Property>,
    latency: Duration,
}

impl MockPropertyStore {
    /// Creates a store over the bundled fixture.
    pub fn new() -> Result<Self> {
        let properties: Vec<Property> = serde_json::from_str(PROPERTY_FIXTURE)?;
        info!("loaded {} properties from bundled fixture", properties.len());
        Ok(Self {
            properties,
            latency: DEFAULT_LATENCY,
        })
    }

    /// Creates a store over an explicit set of properties.
    pub fn with_properties(properties: Vec<Property>) -> Self {
        Self {
            properties,
            latency: DEFAULT_LATENCY,
        }
    }

    /// Overrides the artificial latency; tests set this to zero.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl PropertyStore for MockPropertyStore {
    async fn list_all(&self) -> Result<Vec<Property>> {
        self.simulate_latency().await;
        Ok(self.properties.clone())
    }

    async fn get_by_id(&self, id: u64) -> Result<Property> {
        self.simulate_latency().await;
        self.properties
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(StoreError::PropertyNotFound { id })
    }

    async fn query(&self, spec: &FilterSpec, sort: SortKey) -> Result<Vec<Property>> {
        self.simulate_latency().await;
        let results = engine::search(&self.properties, spec, sort);
        debug!(
            matched = results.len(),
            total = self.properties.len(),
            sort = sort.as_str(),
            "mock query"
        );
        Ok(results)
    }
}

struct Ledger {
    records: Vec<SavedProperty>,
    next_id: u64,
}

/// In-memory saved-property ledger.
///
/// State is shared behind a mutex so clones of the store see the same
/// records. Each call locks once; a check-then-act sequence spanning two
/// calls can still interleave with another caller, which mirrors how the
/// real backend behaves without a reservation step.
#[derive(Clone)]
pub struct MockSavedPropertyStore {
    ledger: Arc<Mutex<Ledger>>,
    latency: Duration,
}

impl MockSavedPropertyStore {
    pub fn new() -> Self {
        Self {
            ledger: Arc::new(Mutex::new(Ledger {
                records: Vec::new(),
                next_id: 1,
            })),
            latency: DEFAULT_LATENCY,
        }
    }

    /// Overrides the artificial latency; tests set this to zero.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockSavedPropertyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SavedPropertyStore for MockSavedPropertyStore {
    async fn list_all(&self) -> Result<Vec<SavedProperty>> {
        self.simulate_latency().await;
        let ledger = self.ledger.lock().await;
        Ok(ledger.records.clone())
    }

    async fn save(&self, property_id: u64) -> Result<SavedProperty> {
        self.simulate_latency().await;
        let mut ledger = self.ledger.lock().await;
        if ledger.records.iter().any(|r| r.property_id == property_id) {
            return Err(StoreError::AlreadySaved { id: property_id });
        }
        let record = SavedProperty {
            id: ledger.next_id,
            property_id,
            saved_date: Utc::now(),
        };
        ledger.next_id += 1;
        ledger.records.push(record.clone());
        info!(property_id, "property saved");
        Ok(record)
    }

    async fn remove(&self, property_id: u64) -> Result<SavedProperty> {
        self.simulate_latency().await;
        let mut ledger = self.ledger.lock().await;
        let position = ledger
            .records
            .iter()
            .position(|r| r.property_id == property_id)
            .ok_or(StoreError::SavedNotFound { id: property_id })?;
        let removed = ledger.records.remove(position);
        info!(property_id, "property removed from saved list");
        Ok(removed)
    }

    async fn is_saved(&self, property_id: u64) -> Result<bool> {
        self.simulate_latency().await;
        let ledger = self.ledger.lock().await;
        Ok(ledger.records.iter().any(|r| r.property_id == property_id))
    }
}
