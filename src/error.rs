use thiserror::Error;

/// Errors surfaced by the property and saved-property stores.
///
/// `PropertyNotFound`, `SavedNotFound`, and `AlreadySaved` are recoverable
/// conditions the caller is expected to report to the user; `Backend` and
/// `Fixture` indicate the store itself could not do its job.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No property record matches the requested id.
    #[error("property {id} not found")]
    PropertyNotFound { id: u64 },

    /// No saved-property record exists for the given property id.
    #[error("property {id} is not in the saved list")]
    SavedNotFound { id: u64 },

    /// A saved-property record already exists for the given property id.
    #[error("property {id} is already saved")]
    AlreadySaved { id: u64 },

    /// The remote backend rejected the request or could not be reached.
    #[error("backend request failed: {0}")]
    Backend(String),

    /// The bundled fixture could not be parsed.
    #[error("failed to parse property fixture: {0}")]
    Fixture(#[from] serde_json::Error),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
