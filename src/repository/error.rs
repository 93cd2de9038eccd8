//! Error types for the repository collaborator

use std::fmt;
use thiserror::Error;

use crate::domain::EntityKind;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Query or connection failure inside the store
    #[error("Database error: {0}")]
    Database(String),

    /// No row matched the criteria
    #[error("Not found: {0}")]
    NotFound(String),

    /// A row with the same identifier already exists
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A generically updated value could not be turned back into its entity
    #[error("Failed to restore {kind} from updated value: {reason}")]
    Restore { kind: EntityKind, reason: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RepositoryError {
    pub fn database<E: fmt::Display>(err: E) -> Self {
        Self::Database(err.to_string())
    }

    pub fn not_found<E: fmt::Display>(item: E) -> Self {
        Self::NotFound(item.to_string())
    }

    pub fn conflict<E: fmt::Display>(msg: E) -> Self {
        Self::Conflict(msg.to_string())
    }

    pub fn restore<E: fmt::Display>(kind: EntityKind, reason: E) -> Self {
        Self::Restore {
            kind,
            reason: reason.to_string(),
        }
    }

    pub fn serialization<E: fmt::Display>(err: E) -> Self {
        Self::Serialization(err.to_string())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_restore(&self) -> bool {
        matches!(self, Self::Restore { .. })
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err)
    }
}

impl From<serde_yaml::Error> for RepositoryError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::serialization(err)
    }
}
