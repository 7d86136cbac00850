//! Eager loading of to-one relationships.
//!
//! `select_related` widens the select list with the related entities'
//! columns so one statement fetches the root row and its to-one targets.
//! Columns are aliased `<path>__<column>` (hops joined by `__`), which is
//! what row unflattening keys on. To-many hops are rejected: they would
//! duplicate root rows.

use crate::chain::AssociationChain;
use crate::error::{QueryError, QueryResult};
use crate::join::{AssociationJoiner, JoinMap};
use crate::path::RELATIONSHIP_SEPARATOR;
use crate::schema::SchemaGraph;
use crate::sql::token::{Token, TokenStream};

#[derive(Debug, Clone)]
struct RelatedEntry {
    path_id: String,
    joins: JoinMap,
    target_alias: String,
    columns: Vec<String>,
}

/// The resolved eager-join spec.
#[derive(Debug, Clone, Default)]
pub struct SelectRelated {
    entries: Vec<RelatedEntry>,
}

impl SelectRelated {
    /// Resolve hop-only paths (`zone`, `zone::parent_zone`). Every hop must
    /// be to-one.
    pub fn new(schema: &SchemaGraph, entity: &str, paths: &[&str]) -> QueryResult<Self> {
        let root_table = schema.entity(entity)?.table.clone();
        let mut entries = Vec::with_capacity(paths.len());
        for path in paths {
            let hops: Vec<String> = path
                .split(RELATIONSHIP_SEPARATOR)
                .map(str::to_owned)
                .collect();
            if hops.iter().any(String::is_empty) {
                return Err(QueryError::MalformedPath {
                    path: (*path).to_owned(),
                    reason: "empty relationship hop".into(),
                });
            }
            let chain = AssociationChain::resolve_to_one(schema, entity, &hops, path)?;
            let (joins, target_alias) = AssociationJoiner::build(schema, &root_table, &chain)?;
            let columns = schema.entity(&chain.target)?.columns.clone();
            entries.push(RelatedEntry {
                path_id: hops.join("__"),
                joins,
                target_alias,
                columns,
            });
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for entry in &self.entries {
            joins.merge(&entry.joins);
        }
    }

    /// `alias.col AS path__col, ...` for every column of every target.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        let mut first = true;
        for entry in &self.entries {
            for column in &entry.columns {
                if !first {
                    ts.comma().space();
                }
                ts.push(Token::Ident(format!("{}.{}", entry.target_alias, column)))
                    .space()
                    .push(Token::As)
                    .space()
                    .push(Token::Ident(format!("{}__{}", entry.path_id, column)));
                first = false;
            }
        }
        ts
    }
}
