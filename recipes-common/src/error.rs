//! Common error types for the recipes service

use thiserror::Error;

/// Common result type for recipe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, persistence and configuration layers
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or incomplete recipe input
    #[error("Invalid recipe: {0}")]
    Validation(String),

    /// No recipe with the requested id
    #[error("Recipe {0} not found")]
    NotFound(String),

    /// Backing file could not be written
    ///
    /// The in-memory collection has already been updated when this is returned.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// JSON encoding or decoding error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for outcomes caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::NotFound(_))
    }
}
