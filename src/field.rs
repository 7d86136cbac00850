//! Schema-resolved field references.
//!
//! A [`ResolvedField`] is a parsed path checked against the schema: the
//! joins its hops require (none for a local path) plus the alias-qualified
//! column it reads. Conditions, ordering, aggregation and projection all
//! resolve through here so they agree on aliases.

use crate::error::QueryResult;
use crate::chain::AssociationChain;
use crate::join::{AssociationJoiner, JoinMap};
use crate::path::ParsedPath;
use crate::schema::SchemaGraph;

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub joins: JoinMap,
    /// Table alias the column is read from: the root table for local
    /// paths, the final join alias for foreign ones.
    pub table_alias: String,
    pub column: String,
}

impl ResolvedField {
    pub fn resolve(
        schema: &SchemaGraph,
        entity: &str,
        path: &ParsedPath,
        original: &str,
    ) -> QueryResult<Self> {
        let root = schema.entity(entity)?;
        if path.is_local() {
            let column = schema.resolve_column(root, &path.field)?;
            return Ok(Self {
                joins: JoinMap::new(),
                table_alias: root.table.clone(),
                column,
            });
        }

        let chain = AssociationChain::resolve(schema, entity, &path.hops, original)?;
        let (joins, table_alias) = AssociationJoiner::build(schema, &root.table, &chain)?;
        let target = schema.entity(&chain.target)?;
        let column = schema.resolve_column(target, &path.field)?;
        Ok(Self {
            joins,
            table_alias,
            column,
        })
    }

    /// `alias.column`, as it appears in rendered SQL.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table_alias, self.column)
    }
}
