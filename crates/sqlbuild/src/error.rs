//! Error types for sqlbuild

use thiserror::Error;

/// Result type alias for sqlbuild operations
pub type OrmResult<T> = Result<T, OrmError>;

/// Boxed error reported by an [`Executor`](crate::Executor) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error types for statement building and execution
#[derive(Debug, Error)]
pub enum OrmError {
    /// Column payload is neither a mapping nor a record
    #[error("Invalid column source: {0}")]
    InvalidColumnSource(String),

    /// Failure reported by the execution collaborator, passed through untouched
    #[error("Execution error: {0}")]
    Execution(#[source] BoxError),

    /// Builder state cannot produce a statement
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization error (`#[orm(json)]` fields)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl OrmError {
    /// Create an invalid column source error naming the rejected kind
    pub fn invalid_column_source(kind: impl std::fmt::Display) -> Self {
        Self::InvalidColumnSource(format!(
            "invalid type: expected a mapping or record, got {kind}"
        ))
    }

    /// Create an invalid column source error for a key that is not a column name
    pub fn invalid_column_name(name: &str) -> Self {
        Self::InvalidColumnSource(format!(
            "invalid column name `{name}`: expected an SQL identifier"
        ))
    }

    /// Wrap a driver error
    pub fn execution(err: impl Into<BoxError>) -> Self {
        Self::Execution(err.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an invalid column source error
    pub fn is_invalid_column_source(&self) -> bool {
        matches!(self, Self::InvalidColumnSource(_))
    }

    /// Check if this is an execution error
    pub fn is_execution(&self) -> bool {
        matches!(self, Self::Execution(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<serde_json::Error> for OrmError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
