//! Converts raw driver rows into typed domain entities.

use mongodb::bson::{self, Document};

use sampledb_domain::{DomainError, SampleEntity};

/// Factory for typed entities from untyped store rows.
pub struct EntityFactory;

impl EntityFactory {
    /// Build a [`SampleEntity`] from a raw document.
    ///
    /// Missing or mistyped fields are reported as a malformed-record error
    /// instead of panicking on a bad row.
    pub fn sample_entity(row: Document) -> Result<SampleEntity, DomainError> {
        bson::from_document(row).map_err(|err| DomainError::MalformedRecord {
            entity_type: SampleEntity::SCHEMA.name,
            reason: err.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    #[test]
    fn test_row_to_entity() {
        let row = doc! { "_id": 1_i64, "text": "jeden" };
        let entity = EntityFactory::sample_entity(row).unwrap();
        assert_eq!(entity, SampleEntity::new(1, "jeden"));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let row = doc! { "_id": 1_i64 };
        let err = EntityFactory::sample_entity(row).unwrap_err();
        assert!(matches!(err, DomainError::MalformedRecord { .. }));
    }

    #[test]
    fn test_mistyped_field_is_malformed() {
        let row = doc! { "_id": "not-a-number", "text": "jeden" };
        assert!(EntityFactory::sample_entity(row).is_err());
    }
}
