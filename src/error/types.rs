// src/error/types.rs
//
// Application-level error type. Domain invariant violations, storage
// failures, and integration failures all converge here so callers deal
// with one Result type.

use crate::domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// SQLite-level failure in the storage layer
    #[error("Storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Connection pool error: {0}")]
    Pool(String),

    /// A domain invariant was violated
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The stored document, catalog line, or API payload did not parse
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure talking to a product or recipe API
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Lookup by serial number, food type id, or recipe id came up empty
    #[error("Resource not found")]
    NotFound,

    /// Insert collided with an existing record for the same key
    #[error("Record already exists: {0}")]
    AlreadyExists(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
