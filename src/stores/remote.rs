use crate::engine::{self, FilterSpec, SortKey};
use crate::error::{Result, StoreError};
use crate::models::{Property, SavedProperty};
use crate::stores::traits::{FetchPolicy, PropertyStore, SavedPropertyStore};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info};

const PROPERTIES_TABLE: &str = "properties";
const SAVED_TABLE: &str = "saved_properties";

/// One comparison sent to the backend's record-query endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhereClause {
    pub field: &'static str,
    pub op: &'static str,
    pub values: Vec<String>,
}

impl WhereClause {
    fn new(field: &'static str, op: &'static str, values: Vec<String>) -> Self {
        Self { field, op, values }
    }
}

/// Body of a record query: `where` clauses AND together, each inner list
/// of `any_of` is a group whose clauses OR together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryBody {
    #[serde(rename = "where", skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<WhereClause>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub any_of: Vec<Vec<WhereClause>>,
}

/// Translates a filter spec into backend query clauses with the same
/// semantics the local engine applies: inclusive numeric bounds, match-any
/// property types, and a disjunctive substring group for the location.
pub fn build_query(spec: &FilterSpec) -> QueryBody {
    let mut body = QueryBody::default();
    if let Some(min) = spec.price_min {
        body.conditions
            .push(WhereClause::new("price", "gte", vec![min.to_string()]));
    }
    if let Some(max) = spec.price_max {
        body.conditions
            .push(WhereClause::new("price", "lte", vec![max.to_string()]));
    }
    if !spec.property_types.is_empty() {
        body.conditions.push(WhereClause::new(
            "property_type",
            "in",
            spec.property_types.clone(),
        ));
    }
    if let Some(min) = spec.bedrooms_min {
        body.conditions
            .push(WhereClause::new("bedrooms", "gte", vec![min.to_string()]));
    }
    if let Some(min) = spec.bathrooms_min {
        body.conditions
            .push(WhereClause::new("bathrooms", "gte", vec![min.to_string()]));
    }
    if let Some(min) = spec.square_feet_min {
        body.conditions.push(WhereClause::new(
            "square_feet",
            "gte",
            vec![min.to_string()],
        ));
    }
    if spec.has_location() {
        let needle = spec
            .location
            .as_deref()
            .unwrap_or_default()
            .trim()
            .to_string();
        body.any_of.push(vec![
            WhereClause::new("city", "contains", vec![needle.clone()]),
            WhereClause::new("state", "contains", vec![needle.clone()]),
            WhereClause::new("title", "contains", vec![needle]),
        ]);
    }
    body
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    success: bool,
    message: Option<String>,
    data: Option<T>,
}

/// Thin JSON-over-HTTP client for the record backend, shared by both
/// remote stores.
#[derive(Clone)]
struct BackendClient {
    client: Client,
    base_url: String,
}

impl BackendClient {
    fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(%url, "backend request");
        let response = self.client.post(&url).json(body).send().await?;
        if !response.status().is_success() {
            return Err(StoreError::Backend(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }
        let envelope: Envelope<T> = response.json().await?;
        if !envelope.success {
            return Err(StoreError::Backend(
                envelope
                    .message
                    .unwrap_or_else(|| "backend reported failure".to_string()),
            ));
        }
        envelope
            .data
            .ok_or_else(|| StoreError::Backend("backend response had no data".to_string()))
    }

    async fn query_records<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &QueryBody,
    ) -> Result<Vec<T>> {
        self.post(&format!("tables/{}/query", table), body).await
    }
}

/// Property repository backed by the remote record service.
pub struct RemotePropertyStore {
    backend: BackendClient,
    policy: FetchPolicy,
}

impl RemotePropertyStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            backend: BackendClient::new(base_url)?,
            policy: FetchPolicy::default(),
        })
    }

    /// Chooses what collection fetches do on backend failure.
    pub fn with_policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    fn absorb(&self, err: StoreError, operation: &str) -> Result<Vec<Property>> {
        match self.policy {
            FetchPolicy::FailOpen => {
                error!(%err, operation, "backend fetch failed, returning empty result");
                Ok(Vec::new())
            }
            FetchPolicy::Propagate => Err(err),
        }
    }
}

#[async_trait]
impl PropertyStore for RemotePropertyStore {
    async fn list_all(&self) -> Result<Vec<Property>> {
        match self
            .backend
            .query_records(PROPERTIES_TABLE, &QueryBody::default())
            .await
        {
            Ok(properties) => Ok(properties),
            Err(err) => self.absorb(err, "list_all"),
        }
    }

    async fn get_by_id(&self, id: u64) -> Result<Property> {
        let body = QueryBody {
            conditions: vec![WhereClause::new("id", "eq", vec![id.to_string()])],
            ..Default::default()
        };
        let records: Vec<Property> = self.backend.query_records(PROPERTIES_TABLE, &body).await?;
        records
            .into_iter()
            .next()
            .ok_or(StoreError::PropertyNotFound { id })
    }

    async fn query(&self, spec: &FilterSpec, sort: SortKey) -> Result<Vec<Property>> {
        let body = build_query(spec);
        match self
            .backend
            .query_records::<Property>(PROPERTIES_TABLE, &body)
            .await
        {
            Ok(mut properties) => {
                // The backend filters but does not order, so the shared
                // engine supplies the sort half of the contract.
                engine::sort_properties(&mut properties, sort);
                info!(matched = properties.len(), sort = sort.as_str(), "remote query");
                Ok(properties)
            }
            Err(err) => self.absorb(err, "query"),
        }
    }
}

#[derive(Debug, Serialize)]
struct NewSavedRecord {
    property_id: u64,
    saved_date: chrono::DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct DeleteBody {
    record_ids: Vec<u64>,
}

/// Saved-property ledger backed by the remote record service.
pub struct RemoteSavedPropertyStore {
    backend: BackendClient,
}

impl RemoteSavedPropertyStore {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            backend: BackendClient::new(base_url)?,
        })
    }

    async fn find_by_property(&self, property_id: u64) -> Result<Option<SavedProperty>> {
        let body = QueryBody {
            conditions: vec![WhereClause::new(
                "property_id",
                "eq",
                vec![property_id.to_string()],
            )],
            ..Default::default()
        };
        let records: Vec<SavedProperty> = self.backend.query_records(SAVED_TABLE, &body).await?;
        Ok(records.into_iter().next())
    }
}

#[async_trait]
impl SavedPropertyStore for RemoteSavedPropertyStore {
    async fn list_all(&self) -> Result<Vec<SavedProperty>> {
        self.backend
            .query_records(SAVED_TABLE, &QueryBody::default())
            .await
    }

    async fn save(&self, property_id: u64) -> Result<SavedProperty> {
        if self.find_by_property(property_id).await?.is_some() {
            return Err(StoreError::AlreadySaved { id: property_id });
        }
        let record = NewSavedRecord {
            property_id,
            saved_date: Utc::now(),
        };
        let created: Vec<SavedProperty> = self
            .backend
            .post(&format!("tables/{}/records", SAVED_TABLE), &record)
            .await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Backend("create returned no record".to_string()))
    }

    async fn remove(&self, property_id: u64) -> Result<SavedProperty> {
        let record = self
            .find_by_property(property_id)
            .await?
            .ok_or(StoreError::SavedNotFound { id: property_id })?;
        let _: Vec<u64> = self
            .backend
            .post(
                &format!("tables/{}/delete", SAVED_TABLE),
                &DeleteBody {
                    record_ids: vec![record.id],
                },
            )
            .await?;
        info!(property_id, "removed saved property from backend");
        Ok(record)
    }

    async fn is_saved(&self, property_id: u64) -> Result<bool> {
        Ok(self.find_by_property(property_id).await?.is_some())
    }
}
