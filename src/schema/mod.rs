//! Declared entity graph: tables, columns, primary keys and relationships.
//!
//! The graph is built once through [`SchemaGraph::builder`] and validated as
//! a whole: every relationship target must name a declared entity, through
//! relationships must resolve end to end, and implicit join keys are filled
//! in from the primary keys involved. Queries only ever see the validated
//! graph, so path resolution never has to guess.

pub mod relationship;

pub use relationship::{Cardinality, Relationship};

use std::collections::BTreeMap;

use inflector::Inflector;
use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

// =============================================================================
// Entity declaration (builder input)
// =============================================================================

/// Declaration of a single entity, fed to [`SchemaBuilder::entity`].
///
/// Join keys may be left implicit: `belongs_to` defaults its foreign key to
/// `<name>_id` on the origin and joins the target's primary key; `has_one`
/// and `has_many` take the foreign-key column on the target and join the
/// origin's primary key.
#[derive(Debug, Clone)]
pub struct Entity {
    name: String,
    table: String,
    primary_key: String,
    columns: Vec<String>,
    relationships: Vec<RelationshipSpec>,
}

#[derive(Debug, Clone)]
struct RelationshipSpec {
    name: String,
    target: String,
    cardinality: Cardinality,
    origin_key: Option<String>,
    target_key: Option<String>,
}

impl Entity {
    /// Start declaring an entity. The table name defaults to the pluralized
    /// snake_case of the entity name (`GeoZone` -> `geo_zones`) and the
    /// primary key to `id`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let table = name.to_table_case();
        Self {
            name,
            table,
            primary_key: "id".into(),
            columns: Vec::new(),
            relationships: Vec::new(),
        }
    }

    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    #[must_use]
    pub fn primary_key(mut self, pk: impl Into<String>) -> Self {
        self.primary_key = pk.into();
        self
    }

    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// To-one relationship whose foreign key lives on this entity, named
    /// `<name>_id` by convention.
    #[must_use]
    pub fn belongs_to(self, name: impl Into<String>, target: impl Into<String>) -> Self {
        let name = name.into();
        let origin_key = format!("{}_id", name);
        self.belongs_to_keyed(name, target, origin_key)
    }

    /// `belongs_to` with an explicit foreign-key column on this entity.
    #[must_use]
    pub fn belongs_to_keyed(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        origin_key: impl Into<String>,
    ) -> Self {
        self.relationships.push(RelationshipSpec {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToOne,
            origin_key: Some(origin_key.into()),
            target_key: None,
        });
        self
    }

    /// To-one relationship whose foreign key lives on the target.
    #[must_use]
    pub fn has_one(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        target_key: impl Into<String>,
    ) -> Self {
        self.relationships.push(RelationshipSpec {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToOne,
            origin_key: None,
            target_key: Some(target_key.into()),
        });
        self
    }

    /// To-many relationship keyed by a foreign-key column on the target.
    #[must_use]
    pub fn has_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
        target_key: impl Into<String>,
    ) -> Self {
        self.relationships.push(RelationshipSpec {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ToMany,
            origin_key: None,
            target_key: Some(target_key.into()),
        });
        self
    }

    /// Many-to-many through a declared intermediate: `through` is a
    /// relationship on this entity reaching the intermediate, `source` a
    /// relationship on the intermediate reaching the final target. The final
    /// target is resolved at build time.
    #[must_use]
    pub fn has_many_through(
        mut self,
        name: impl Into<String>,
        through: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        self.relationships.push(RelationshipSpec {
            name: name.into(),
            target: String::new(),
            cardinality: Cardinality::ManyToManyVia {
                through: through.into(),
                source: source.into(),
            },
            origin_key: None,
            target_key: None,
        });
        self
    }

    /// Keyless many-to-many. Declarable, never traversable.
    #[must_use]
    pub fn has_and_belongs_to_many(
        mut self,
        name: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.relationships.push(RelationshipSpec {
            name: name.into(),
            target: target.into(),
            cardinality: Cardinality::ManyToMany,
            origin_key: None,
            target_key: None,
        });
        self
    }
}

// =============================================================================
// Built graph
// =============================================================================

/// A validated entity with resolved relationships.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDef {
    pub name: String,
    pub table: String,
    pub primary_key: String,
    pub columns: Vec<String>,
    pub relationships: BTreeMap<String, Relationship>,
}

impl EntityDef {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }
}

/// The validated entity graph all querysets resolve paths against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaGraph {
    entities: BTreeMap<String, EntityDef>,
}

impl SchemaGraph {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder {
            entities: Vec::new(),
        }
    }

    pub fn entity(&self, name: &str) -> QueryResult<&EntityDef> {
        self.entities.get(name).ok_or_else(|| QueryError::UnknownEntity {
            entity: name.to_owned(),
        })
    }

    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Resolve a field name on an entity to the column it reads: either a
    /// declared column, or the foreign-key column of a to-one relationship
    /// whose key lives on the origin (`zone` -> `zone_id`).
    pub fn resolve_column(&self, entity: &EntityDef, field: &str) -> QueryResult<String> {
        if entity.has_column(field) {
            return Ok(field.to_owned());
        }
        if let Some(rel) = entity.relationship(field) {
            if rel.is_to_one() && rel.origin_key != entity.primary_key {
                return Ok(rel.origin_key.clone());
            }
        }
        Err(QueryError::UnknownField {
            entity: entity.name.clone(),
            field: field.to_owned(),
        })
    }
}

// =============================================================================
// Builder / validation
// =============================================================================

/// Collects entity declarations and validates them into a [`SchemaGraph`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    entities: Vec<Entity>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn entity(mut self, entity: Entity) -> Self {
        self.entities.push(entity);
        self
    }

    pub fn build(self) -> QueryResult<SchemaGraph> {
        let mut entities: BTreeMap<String, EntityDef> = BTreeMap::new();

        // Pass 1: register entities so relationship targets can be checked.
        for decl in &self.entities {
            if entities.contains_key(&decl.name) {
                return Err(QueryError::InvalidSchema(format!(
                    "duplicate entity `{}`",
                    decl.name
                )));
            }
            let mut columns = decl.columns.clone();
            if !columns.iter().any(|c| *c == decl.primary_key) {
                columns.insert(0, decl.primary_key.clone());
            }
            entities.insert(
                decl.name.clone(),
                EntityDef {
                    name: decl.name.clone(),
                    table: decl.table.clone(),
                    primary_key: decl.primary_key.clone(),
                    columns,
                    relationships: BTreeMap::new(),
                },
            );
        }

        // Pass 2: resolve plain relationships, filling implicit join keys
        // from the primary keys on each side.
        for decl in &self.entities {
            let origin_pk = entities
                .get(&decl.name)
                .map(|e| e.primary_key.clone())
                .unwrap_or_default();
            let mut resolved = BTreeMap::new();
            for spec in &decl.relationships {
                if resolved.contains_key(&spec.name) {
                    return Err(QueryError::InvalidSchema(format!(
                        "duplicate relationship `{}` on `{}`",
                        spec.name, decl.name
                    )));
                }
                let rel = match &spec.cardinality {
                    Cardinality::ManyToManyVia { .. } => Relationship {
                        name: spec.name.clone(),
                        origin: decl.name.clone(),
                        target: String::new(),
                        cardinality: spec.cardinality.clone(),
                        origin_key: origin_pk.clone(),
                        target_key: String::new(),
                    },
                    _ => {
                        let target = entities.get(&spec.target).ok_or_else(|| {
                            QueryError::InvalidSchema(format!(
                                "relationship `{}` of `{}` targets undeclared entity `{}`",
                                spec.name, decl.name, spec.target
                            ))
                        })?;
                        Relationship {
                            name: spec.name.clone(),
                            origin: decl.name.clone(),
                            target: target.name.clone(),
                            cardinality: spec.cardinality.clone(),
                            origin_key: spec.origin_key.clone().unwrap_or_else(|| origin_pk.clone()),
                            target_key: spec
                                .target_key
                                .clone()
                                .unwrap_or_else(|| target.primary_key.clone()),
                        }
                    }
                };
                resolved.insert(spec.name.clone(), rel);
            }
            if let Some(def) = entities.get_mut(&decl.name) {
                def.relationships = resolved;
            }
        }

        // Pass 3: resolve through relationships to their final targets.
        let mut via_targets: Vec<(String, String, String)> = Vec::new();
        for def in entities.values() {
            for rel in def.relationships.values() {
                if let Cardinality::ManyToManyVia { through, source } = &rel.cardinality {
                    let through_rel = def.relationship(through).ok_or_else(|| {
                        QueryError::InvalidSchema(format!(
                            "through relationship `{}` of `{}` names unknown relationship `{}`",
                            rel.name, def.name, through
                        ))
                    })?;
                    if matches!(
                        through_rel.cardinality,
                        Cardinality::ManyToManyVia { .. } | Cardinality::ManyToMany
                    ) {
                        return Err(QueryError::InvalidSchema(format!(
                            "through relationship `{}` of `{}` cannot nest inside `{}`",
                            rel.name, def.name, through
                        )));
                    }
                    let intermediate =
                        entities.get(&through_rel.target).ok_or_else(|| {
                            QueryError::InvalidSchema(format!(
                                "undeclared intermediate entity `{}`",
                                through_rel.target
                            ))
                        })?;
                    let source_rel = intermediate.relationship(source).ok_or_else(|| {
                        QueryError::InvalidSchema(format!(
                            "through relationship `{}` of `{}`: `{}` has no relationship `{}`",
                            rel.name, def.name, intermediate.name, source
                        ))
                    })?;
                    via_targets.push((
                        def.name.clone(),
                        rel.name.clone(),
                        source_rel.target.clone(),
                    ));
                }
            }
        }
        for (entity, rel_name, target) in via_targets {
            if let Some(rel) = entities
                .get_mut(&entity)
                .and_then(|def| def.relationships.get_mut(&rel_name))
            {
                rel.target = target;
            }
        }

        Ok(SchemaGraph { entities })
    }
}
