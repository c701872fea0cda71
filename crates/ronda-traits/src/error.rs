//! Error types for ronda.
//!
//! Ratio computation itself never fails: an uncomputable ratio is a value
//! (see `ronda_engine::UndefinedRatio`). The errors here cover everything
//! around the core, such as building statement stores and looking up entities.

use thiserror::Error;

/// The main error type for ronda operations.
#[derive(Debug, Error)]
pub enum RondaError {
    /// Error due to invalid or malformed statement data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Error when a required column is missing from a statement table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error when an entity is not present in the provider.
    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    /// Error when data is insufficient for the requested operation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error decoding serialized statement records.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for RondaError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for RondaError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for ronda operations.
pub type Result<T> = std::result::Result<T, RondaError>;
