use crate::engine::{FilterSpec, SortKey};
use crate::error::Result;
use crate::models::{Property, SavedProperty};
use async_trait::async_trait;

/// Common trait for property repositories.
/// One interface, two interchangeable backings (remote service or bundled
/// fixture) selected when the application is wired together.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Every property the store knows about, unfiltered.
    async fn list_all(&self) -> Result<Vec<Property>>;

    /// One property by id; `StoreError::PropertyNotFound` when absent.
    async fn get_by_id(&self, id: u64) -> Result<Property>;

    /// Filtered, ordered query. Must be equivalent to running
    /// `engine::search` over the snapshot `list_all` would return.
    async fn query(&self, spec: &FilterSpec, sort: SortKey) -> Result<Vec<Property>>;
}

/// Common trait for the saved-property ledger.
#[async_trait]
pub trait SavedPropertyStore: Send + Sync {
    /// All active bookmarks.
    async fn list_all(&self) -> Result<Vec<SavedProperty>>;

    /// Bookmarks a property; `StoreError::AlreadySaved` when a record for
    /// the id already exists.
    async fn save(&self, property_id: u64) -> Result<SavedProperty>;

    /// Removes the bookmark for a property and returns the removed record;
    /// `StoreError::SavedNotFound` when there is none.
    async fn remove(&self, property_id: u64) -> Result<SavedProperty>;

    /// Whether a bookmark exists for the property.
    async fn is_saved(&self, property_id: u64) -> Result<bool>;
}

/// What `list_all` and `query` do when the backing request fails.
///
/// `FailOpen` preserves the historical behavior of returning an empty
/// result with a logged diagnostic so a flaky backend never blanks the
/// whole browse page; `Propagate` surfaces the error to callers that need
/// to distinguish "zero results" from "fetch failed".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    #[default]
    FailOpen,
    Propagate,
}
