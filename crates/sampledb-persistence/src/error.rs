//! Persistence layer error types

use thiserror::Error;

use sampledb_domain::DomainError;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// An operation was invoked before `connect()` succeeded, or after the
    /// connection was closed.
    #[error("Connection not established")]
    NotConnected,

    #[error("MongoDB error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<mongodb::error::Error> for PersistenceError {
    fn from(err: mongodb::error::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<mongodb::bson::ser::Error> for PersistenceError {
    fn from(err: mongodb::bson::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<mongodb::bson::de::Error> for PersistenceError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
