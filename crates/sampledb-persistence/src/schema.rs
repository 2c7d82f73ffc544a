//! Schema migration: ensure the target database and collection exist,
//! optionally recreating them from scratch first.

use crate::error::Result;
use crate::repository::DocumentStore;

/// Describes the database/collection pair an entity lives in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    database: String,
    collection: String,
}

impl Schema {
    pub fn new(database: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            database: database.into(),
            collection: collection.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Bring the schema up to date.
    ///
    /// With `drop_all_first` the collection is dropped before the database
    /// (dependency order), then database and collection are created in the
    /// reverse order. Both halves are idempotent.
    pub async fn ensure(&self, store: &DocumentStore, drop_all_first: bool) -> Result<()> {
        if drop_all_first {
            tracing::warn!(
                database = %self.database,
                collection = %self.collection,
                "Force-drop enabled, recreating schema from scratch"
            );
            store.drop_collection(&self.database, &self.collection).await?;
            store.drop_database(&self.database).await?;
        }

        store.create_database_if_not_exists(&self.database).await?;
        store
            .create_collection_if_not_exists(&self.database, &self.collection)
            .await?;

        tracing::info!(
            database = %self.database,
            collection = %self.collection,
            "Schema up to date"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_pair() {
        let schema = Schema::new("dev_sampleDB", "SampleEntity");
        assert_eq!(schema.database(), "dev_sampleDB");
        assert_eq!(schema.collection(), "SampleEntity");
    }
}
