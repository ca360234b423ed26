// Errors shared by the request and command surfaces
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LovelaceError {
    /// A required parameter is missing or malformed. Raised before storage is touched.
    #[error("{0}")]
    Validation(String),

    #[error("View with path '{path}' not found")]
    ViewNotFound { path: String },

    /// The stored document exists but could not be read or decoded.
    #[error("Could not retrieve Lovelace configuration: {0}")]
    ReadFailure(String),

    /// The write did not complete; the previous file is still in place.
    #[error("Could not save Lovelace configuration: {0}")]
    PersistFailure(String),

    #[error("Host request failed: {0}")]
    Host(String),
}
