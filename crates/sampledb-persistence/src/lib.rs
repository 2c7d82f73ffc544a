//! # SampleDB Persistence Library
//!
//! Repository-pattern data-access layer over MongoDB for the sampledb demo.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Application Layer               │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │            Repository Trait                  │
//! │        (insert / get_all / update / delete)  │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │            DocumentStore façade              │
//! │  (lifecycle, CRUD primitives, change feed)   │
//! └─────────────────────────────────────────────┘
//!                       │
//!                       ▼
//! ┌─────────────────────────────────────────────┐
//! │              MongoDB driver                  │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The store is a deliberate pass-through: consistency, durability, and
//! concurrency control are delegated entirely to the driver. No pooling
//! beyond the driver's own, no transactions, no retries.

#![forbid(unsafe_code)]
#![warn(clippy::all)]

pub mod changefeed;
pub mod error;
pub mod repository;
pub mod schema;

// Re-export commonly used types
pub use changefeed::{ChangeFeed, ChangeOperation, TableChange};
pub use error::{PersistenceError, Result};
pub use repository::{DocumentStore, EntityFactory, Repository, SampleEntityRepository, StoreConfig};
pub use schema::Schema;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
