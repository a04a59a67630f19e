//! Error types for Shelfmark
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! The variants fall into four caller-visible kinds that the HTTP layer maps to
//! status codes without inspecting storage internals:
//!
//! - `InvalidInput` - missing or malformed input, rejected before persistence
//! - `NotFound` - a referenced book, collection, or membership is absent
//! - `Conflict` - duplicate membership in a collection
//! - everything else - storage or transport failure
//!
//! The CLI's HTTP client reconstructs the same kinds from response status
//! codes, so `book get 42` against a missing id fails with the same error
//! shape whether the lookup happened locally or over the wire.

use thiserror::Error;

/// Result type alias using our ShelfmarkError type
pub type Result<T> = std::result::Result<T, ShelfmarkError>;

/// Main error type for Shelfmark
#[derive(Error, Debug)]
pub enum ShelfmarkError {
    // ===== Input Validation =====

    /// Required field missing or malformed (caught before any row is written)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Domain Errors =====

    /// Referenced entity does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Operation would violate a uniqueness invariant
    #[error("{0}")]
    Conflict(String),

    // ===== Storage Errors =====

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Filesystem problem while opening or creating the database
    #[error("File I/O error: {0}")]
    FileIoError(String),

    // ===== API Client Errors =====

    /// Server responded with a status the client could not classify
    #[error("API request failed: {message}")]
    ApiRequestFailed {
        message: String,
        /// HTTP status code if available
        status_code: Option<u16>,
        /// API endpoint that failed
        endpoint: Option<String>,
    },

    // ===== External Library Errors =====
    // Automatic conversions from external error types

    /// HTTP client error from reqwest
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper methods for creating common errors
impl ShelfmarkError {
    /// Create a NotFound error with a resource name
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        ShelfmarkError::NotFound(resource.into())
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ShelfmarkError::InvalidInput(message.into())
    }

    /// Create a Conflict error with a message
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        ShelfmarkError::Conflict(message.into())
    }

    /// Create an ApiRequestFailed error
    pub fn api_failed<S: Into<String>>(
        message: S,
        status_code: Option<u16>,
        endpoint: Option<String>,
    ) -> Self {
        ShelfmarkError::ApiRequestFailed {
            message: message.into(),
            status_code,
            endpoint,
        }
    }

    /// Check if error is a validation failure
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, ShelfmarkError::InvalidInput(_))
    }

    /// Check if error indicates an absent entity
    pub fn is_not_found(&self) -> bool {
        matches!(self, ShelfmarkError::NotFound(_))
    }

    /// Check if error indicates a duplicate membership
    pub fn is_conflict(&self) -> bool {
        matches!(self, ShelfmarkError::Conflict(_))
    }
}
