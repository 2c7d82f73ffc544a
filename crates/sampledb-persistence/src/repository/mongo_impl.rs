//! MongoDB repository implementation.

use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{FullDocumentType, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use serde::Serialize;

use crate::changefeed::ChangeFeed;
use crate::error::{PersistenceError, Result};
use crate::repository::factory::EntityFactory;
use crate::repository::traits::Repository;
use crate::schema::Schema;
use sampledb_domain::SampleEntity;

// =============================================================================
// STORE CONFIGURATION
// =============================================================================

/// Document store connection configuration.
///
/// Constructed once at startup and passed by reference to every component
/// that needs host/port/force-drop; there is no other configuration source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    /// Recreate the database and collection on connect. Read once, during
    /// `connect()`.
    pub force_drop: bool,
}

impl StoreConfig {
    pub fn connection_string(&self) -> String {
        format!("mongodb://{}:{}/", self.host, self.port)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 27017,
            force_drop: false,
        }
    }
}

// =============================================================================
// DOCUMENT STORE
// =============================================================================

/// Thin façade over a MongoDB connection.
///
/// Owns a single connection handle; every operation besides `connect` guards
/// on it and fails fast with [`PersistenceError::NotConnected`] when the store
/// was never connected (or was closed). Driver errors propagate unchanged,
/// stringified; there is no retry or backoff anywhere in this layer.
pub struct DocumentStore {
    config: StoreConfig,
    client: Option<Client>,
}

impl DocumentStore {
    /// Create an unconnected store. Performs no I/O.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            client: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_some()
    }

    fn client(&self) -> Result<&Client> {
        self.client.as_ref().ok_or(PersistenceError::NotConnected)
    }

    /// Establish the connection and run schema migration for `schema`,
    /// honoring the force-drop flag from the configuration.
    pub async fn connect(&mut self, schema: &Schema) -> Result<()> {
        let client = Client::with_uri_str(self.config.connection_string()).await?;

        // The driver connects lazily; ping so a bad host/port fails here
        // rather than on the first CRUD call.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        self.client = Some(client);
        schema.ensure(self, self.config.force_drop).await?;
        Ok(())
    }

    /// Close the connection. Fails if the store was never connected.
    pub async fn close(&mut self) -> Result<()> {
        let client = self.client.take().ok_or(PersistenceError::NotConnected)?;
        client.shutdown().await;
        Ok(())
    }

    // =========================================================================
    // DATABASE / COLLECTION / INDEX LIFECYCLE
    // =========================================================================

    /// Create a database unless it already exists.
    ///
    /// MongoDB materializes a database with its first collection, so an
    /// absent database needs no explicit create here; the existence check
    /// keeps the operation observable.
    pub async fn create_database_if_not_exists(&self, database: &str) -> Result<()> {
        let names = self.client()?.list_database_names().await?;
        if names.iter().any(|name| name == database) {
            return Ok(());
        }
        tracing::debug!(database, "Database absent, will materialize with its first collection");
        Ok(())
    }

    /// Create a collection unless it already exists.
    ///
    /// List-then-create; a concurrent creator can still win the race, which
    /// surfaces as a driver error. Acceptable for a single-writer demo.
    pub async fn create_collection_if_not_exists(
        &self,
        database: &str,
        collection: &str,
    ) -> Result<()> {
        let db = self.client()?.database(database);
        let names = db.list_collection_names().await?;
        if names.iter().any(|name| name == collection) {
            return Ok(());
        }
        db.create_collection(collection).await?;
        tracing::debug!(database, collection, "Collection created");
        Ok(())
    }

    /// Drop a database. No-op if it does not exist (native drop is
    /// idempotent, no check-then-act needed).
    pub async fn drop_database(&self, database: &str) -> Result<()> {
        self.client()?.database(database).drop().await?;
        Ok(())
    }

    /// Drop a collection. No-op if it does not exist.
    pub async fn drop_collection(&self, database: &str, collection: &str) -> Result<()> {
        self.collection::<Document>(database, collection)?
            .drop()
            .await?;
        Ok(())
    }

    /// Create a single-field index unless an index by that name exists.
    pub async fn create_index_if_not_exists(
        &self,
        database: &str,
        collection: &str,
        index_name: &str,
        index_field: &str,
    ) -> Result<()> {
        let coll = self.collection::<Document>(database, collection)?;
        let names = coll.list_index_names().await?;
        if names.iter().any(|name| name == index_name) {
            return Ok(());
        }

        let model = IndexModel::builder()
            .keys(doc! { index_field: 1 })
            .options(IndexOptions::builder().name(index_name.to_string()).build())
            .build();
        coll.create_index(model).await?;
        tracing::debug!(database, collection, index_name, "Index created");
        Ok(())
    }

    // =========================================================================
    // CRUD PRIMITIVES
    // =========================================================================

    /// Typed collection handle for caller-supplied queries.
    pub fn collection<T: Send + Sync>(&self, database: &str, name: &str) -> Result<Collection<T>> {
        Ok(self.client()?.database(database).collection::<T>(name))
    }

    /// Insert with replace-on-conflict semantics: a stored row sharing the
    /// same primary key is overwritten (upsert).
    pub async fn insert<T>(
        &self,
        database: &str,
        collection: &str,
        id: impl Into<Bson>,
        entity: &T,
    ) -> Result<()>
    where
        T: Serialize + Send + Sync,
    {
        self.collection::<T>(database, collection)?
            .replace_one(doc! { "_id": id.into() }, entity)
            .upsert(true)
            .await?;
        Ok(())
    }

    /// Apply a partial `$set` patch to every row matching `filter`.
    /// Returns the number of modified rows.
    pub async fn update(
        &self,
        database: &str,
        collection: &str,
        filter: Document,
        patch: Document,
    ) -> Result<u64> {
        let result = self
            .collection::<Document>(database, collection)?
            .update_many(filter, doc! { "$set": patch })
            .await?;
        Ok(result.modified_count)
    }

    /// Delete every row matching `filter`. Returns the number of deleted rows.
    pub async fn delete(&self, database: &str, collection: &str, filter: Document) -> Result<u64> {
        let result = self
            .collection::<Document>(database, collection)?
            .delete_many(filter)
            .await?;
        Ok(result.deleted_count)
    }

    /// Identity query: materialize the whole collection into raw documents.
    pub async fn find_all(&self, database: &str, collection: &str) -> Result<Vec<Document>> {
        let cursor = self
            .collection::<Document>(database, collection)?
            .find(doc! {})
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Subscribe to the collection's change feed.
    pub async fn watch(&self, database: &str, collection: &str) -> Result<ChangeFeed> {
        let stream = self
            .collection::<Document>(database, collection)?
            .watch()
            .full_document(FullDocumentType::UpdateLookup)
            .await?;
        Ok(ChangeFeed::spawn(stream))
    }
}

// =============================================================================
// SAMPLE ENTITY REPOSITORY
// =============================================================================

/// Binds the generic [`DocumentStore`] to the [`SampleEntity`] schema,
/// implementing the [`Repository`] contract with filter-by-id semantics.
pub struct SampleEntityRepository {
    store: Arc<DocumentStore>,
    database: String,
}

impl SampleEntityRepository {
    pub fn new(store: Arc<DocumentStore>, database: impl Into<String>) -> Self {
        Self {
            store,
            database: database.into(),
        }
    }

    /// Subscribe to changes on the entity's collection.
    pub async fn watch(&self) -> Result<ChangeFeed> {
        self.store
            .watch(&self.database, SampleEntity::SCHEMA.name)
            .await
    }
}

#[async_trait]
impl Repository<SampleEntity> for SampleEntityRepository {
    async fn insert(&self, entity: &SampleEntity) -> Result<()> {
        self.store
            .insert(&self.database, SampleEntity::SCHEMA.name, entity.id, entity)
            .await
    }

    async fn get_all(&self) -> Result<Vec<SampleEntity>> {
        let rows = self
            .store
            .find_all(&self.database, SampleEntity::SCHEMA.name)
            .await?;
        rows.into_iter()
            .map(|row| EntityFactory::sample_entity(row).map_err(Into::into))
            .collect()
    }

    async fn update(&self, entity: &SampleEntity) -> Result<()> {
        let modified = self
            .store
            .update(
                &self.database,
                SampleEntity::SCHEMA.name,
                doc! { "_id": entity.id },
                doc! { "text": entity.text.as_str() },
            )
            .await?;
        tracing::debug!(id = entity.id, modified, "Patched entity text");
        Ok(())
    }

    async fn delete(&self, entity: &SampleEntity) -> Result<()> {
        self.store
            .delete(
                &self.database,
                SampleEntity::SCHEMA.name,
                doc! { "_id": entity.id },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unconnected_store() -> DocumentStore {
        DocumentStore::new(StoreConfig::default())
    }

    #[test]
    fn test_connection_string() {
        let config = StoreConfig {
            host: "192.168.1.1".to_string(),
            port: 28015,
            force_drop: false,
        };
        assert_eq!(config.connection_string(), "mongodb://192.168.1.1:28015/");
    }

    #[test]
    fn test_new_store_is_not_connected() {
        assert!(!unconnected_store().is_connected());
    }

    #[tokio::test]
    async fn test_operations_fail_fast_before_connect() {
        let store = unconnected_store();

        assert!(matches!(
            store.find_all("dev_sampleDB", "SampleEntity").await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            store
                .insert("dev_sampleDB", "SampleEntity", 1_i64, &SampleEntity::new(1, "jeden"))
                .await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            store
                .update("dev_sampleDB", "SampleEntity", doc! {}, doc! {})
                .await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            store.delete("dev_sampleDB", "SampleEntity", doc! {}).await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            store.drop_database("dev_sampleDB").await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            store.watch("dev_sampleDB", "SampleEntity").await,
            Err(PersistenceError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_close_before_connect_fails() {
        let mut store = unconnected_store();
        assert!(matches!(
            store.close().await,
            Err(PersistenceError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_repository_guards_propagate() {
        let repository =
            SampleEntityRepository::new(Arc::new(unconnected_store()), "dev_sampleDB");

        assert!(matches!(
            repository.get_all().await,
            Err(PersistenceError::NotConnected)
        ));
        assert!(matches!(
            repository.insert(&SampleEntity::new(1, "jeden")).await,
            Err(PersistenceError::NotConnected)
        ));
    }
}
