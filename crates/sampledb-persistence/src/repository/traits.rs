//! # Repository Traits
//!
//! Abstract repository interface for domain entities.
//! Implementations can be swapped for different backends (MongoDB, mock, etc.)

use async_trait::async_trait;

use crate::error::Result;

/// Generic repository contract over a domain entity.
///
/// `update` takes the full entity and applies a field-level patch keyed by the
/// entity's id; callers never pass a separate partial-data argument.
#[async_trait]
pub trait Repository<T>: Send + Sync {
    /// Insert an entity, replacing any stored row with the same primary key.
    async fn insert(&self, entity: &T) -> Result<()>;

    /// Fetch every stored entity. Ordering is whatever the store returns.
    async fn get_all(&self) -> Result<Vec<T>>;

    /// Patch the stored row matching the entity's id with its current fields.
    async fn update(&self, entity: &T) -> Result<()>;

    /// Delete all rows matching the entity's id.
    async fn delete(&self, entity: &T) -> Result<()>;
}
