//! Repository abstractions and the MongoDB-backed implementation.

mod factory;
mod mongo_impl;
mod traits;

pub use factory::EntityFactory;
pub use mongo_impl::{DocumentStore, SampleEntityRepository, StoreConfig};
pub use traits::Repository;
