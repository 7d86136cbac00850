//! Typed relationships between entities.
//!
//! A relationship records everything a join needs: the two entities, the
//! join columns on each side, and the cardinality. Many-to-many links are
//! only traversable when declared through an explicit intermediate entity.

use serde::{Deserialize, Serialize};

/// How many rows the target side can contribute per origin row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// Zero or one related row (`belongs_to` / `has_one`).
    ToOne,
    /// Any number of related rows, keyed by a foreign key on the target.
    ToMany,
    /// Many-to-many traversed through a declared intermediate entity.
    /// `through` names a relationship on the origin that reaches the
    /// intermediate; `source` names the relationship on the intermediate
    /// that reaches the final target.
    ManyToManyVia { through: String, source: String },
    /// Keyless many-to-many. Declarable for completeness, but any path that
    /// traverses one is rejected with `UnsupportedRelationship`.
    ManyToMany,
}

/// A resolved, directed relationship between two declared entities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    pub name: String,
    /// Entity that declares the relationship.
    pub origin: String,
    /// Entity the relationship points at. For `ManyToManyVia` this is the
    /// final target, past the intermediate.
    pub target: String,
    pub cardinality: Cardinality,
    /// Join column on the origin table.
    pub origin_key: String,
    /// Join column on the target table.
    pub target_key: String,
}

impl Relationship {
    pub fn is_to_one(&self) -> bool {
        matches!(self.cardinality, Cardinality::ToOne)
    }
}
