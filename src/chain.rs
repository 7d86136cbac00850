//! Association chains: the relationship links a path's hops traverse.
//!
//! Resolution walks hop names against the schema, expanding a through
//! relationship into its two underlying links (origin -> intermediate ->
//! target) so the joiner sees only directly joinable relationships.

use crate::error::{QueryError, QueryResult};
use crate::schema::{Cardinality, SchemaGraph};
use crate::schema::relationship::Relationship;

/// A resolved sequence of directly joinable relationship links.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationChain {
    pub links: Vec<Relationship>,
    /// Entity the chain ends on.
    pub target: String,
}

impl AssociationChain {
    /// Resolve hop names starting from `origin`. Through relationships
    /// expand to two links; keyless many-to-many is rejected.
    pub fn resolve(
        schema: &SchemaGraph,
        origin: &str,
        hops: &[String],
        path: &str,
    ) -> QueryResult<Self> {
        let mut links = Vec::with_capacity(hops.len());
        let mut current = origin.to_owned();

        for hop in hops {
            let entity = schema.entity(&current)?;
            let rel = entity.relationship(hop).ok_or_else(|| {
                QueryError::UnknownRelationship {
                    path: path.to_owned(),
                    entity: current.clone(),
                    hop: hop.clone(),
                }
            })?;

            match rel.cardinality.clone() {
                Cardinality::ToOne | Cardinality::ToMany => {
                    current = rel.target.clone();
                    links.push(rel.clone());
                }
                Cardinality::ManyToManyVia { through, source } => {
                    // Schema validation guarantees both legs exist.
                    let through_rel = entity.relationship(&through).ok_or_else(|| {
                        QueryError::UnknownRelationship {
                            path: path.to_owned(),
                            entity: current.clone(),
                            hop: through.clone(),
                        }
                    })?;
                    let intermediate = schema.entity(&through_rel.target)?;
                    let source_rel = intermediate.relationship(&source).ok_or_else(|| {
                        QueryError::UnknownRelationship {
                            path: path.to_owned(),
                            entity: intermediate.name.clone(),
                            hop: source.clone(),
                        }
                    })?;
                    links.push(through_rel.clone());
                    links.push(source_rel.clone());
                    current = source_rel.target.clone();
                }
                Cardinality::ManyToMany => {
                    return Err(QueryError::UnsupportedRelationship {
                        entity: current.clone(),
                        relationship: hop.clone(),
                    });
                }
            }
        }

        Ok(Self {
            links,
            target: current,
        })
    }

    /// Like [`resolve`](Self::resolve), but every link must be to-one.
    /// Used by eager loading, where a to-many hop would duplicate rows.
    pub fn resolve_to_one(
        schema: &SchemaGraph,
        origin: &str,
        hops: &[String],
        path: &str,
    ) -> QueryResult<Self> {
        let chain = Self::resolve(schema, origin, hops, path)?;
        for link in &chain.links {
            if !link.is_to_one() {
                return Err(QueryError::MalformedPath {
                    path: path.to_owned(),
                    reason: format!(
                        "relationship `{}` is to-many; eager loading requires a to-one chain",
                        link.name
                    ),
                });
            }
        }
        Ok(chain)
    }
}
