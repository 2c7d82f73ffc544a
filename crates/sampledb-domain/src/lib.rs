//! # SampleDB Demo - Domain Model
//!
//! Core domain entities and schema descriptors for the repository-pattern
//! demo. These types are the single source of truth across all layers:
//! persistence and CLI.

use serde::{Deserialize, Serialize};

// =============================================================================
// SCHEMA DESCRIPTORS
// =============================================================================

/// Static schema metadata for an entity: the backing collection name plus the
/// property names the entity carries. Used only to name the collection; field
/// presence is not enforced against stored rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub name: &'static str,
    pub properties: &'static [&'static str],
}

// =============================================================================
// ENTITY TYPES
// =============================================================================

/// Sample entity - an immutable id + text value.
///
/// The `id` field doubles as the primary key of the backing collection,
/// hence the `_id` rename on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleEntity {
    #[serde(rename = "_id")]
    pub id: i64,
    pub text: String,
}

impl SampleEntity {
    /// Schema descriptor for the entity's backing collection.
    pub const SCHEMA: EntitySchema = EntitySchema {
        name: "SampleEntity",
        properties: &["id", "text"],
    };

    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Domain-level errors
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Malformed record for {entity_type}: {reason}")]
    MalformedRecord {
        entity_type: &'static str,
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_construction() {
        let entity = SampleEntity::new(1, "jeden");
        assert_eq!(entity.id, 1);
        assert_eq!(entity.text, "jeden");
    }

    #[test]
    fn test_schema_descriptor() {
        assert_eq!(SampleEntity::SCHEMA.name, "SampleEntity");
        assert_eq!(SampleEntity::SCHEMA.properties, &["id", "text"]);
    }

    #[test]
    fn test_id_maps_to_primary_key_on_the_wire() {
        let entity = SampleEntity::new(7, "siedem");
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(json["_id"], 7);
        assert_eq!(json["text"], "siedem");

        let back: SampleEntity = serde_json::from_value(json).unwrap();
        assert_eq!(back, entity);
    }
}
