//! Data-access core for a real-estate listing browser: property models,
//! the shared filter/sort engine, and interchangeable remote- and
//! fixture-backed stores for listings and saved properties.

pub mod engine;
pub mod error;
pub mod models;
pub mod stores;

pub use engine::{FilterSpec, SortKey};
pub use error::StoreError;
pub use models::{Address, Coordinates, Property, SavedProperty};
