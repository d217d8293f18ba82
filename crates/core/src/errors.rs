//! Core error types for the consolidation engine.
//!
//! External collaborators (ERP queries, bank feed, key-value storage) convert
//! their transport-specific failures into these types before handing them to
//! the engine. Nothing here is fatal to the process: every failure is scoped to
//! the company, source or transaction that produced it.

use serde::Serialize;
use thiserror::Error;

use crate::bank::ReconciliationError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Repository call failed: {0}")]
    Repository(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Reconciliation failed: {0}")]
    Reconciliation(#[from] ReconciliationError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Validation errors for configuration and user input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Duplicate identifier: {0}")]
    DuplicateId(String),
}

/// A failed fetch from one independent data source.
///
/// Source failures are collected per source and reported next to the merged
/// data; they never abort the merge of the sources that did succeed.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[error("Fetch from '{source_id}' failed: {message}")]
pub struct SourceError {
    pub source_id: String,
    pub message: String,
}

impl SourceError {
    pub fn new(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            message: message.into(),
        }
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}
