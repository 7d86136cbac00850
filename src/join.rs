//! Joins derived from association chains.
//!
//! Aliases are deterministic: `{origin_table}__{relationship_name}_{position}`,
//! where position is the link's index within its chain. Two paths that
//! traverse the same relationships therefore produce identical aliases, and
//! the [`JoinMap`] deduplicates them so each alias is joined once.

use std::collections::HashMap;

use crate::chain::AssociationChain;
use crate::error::QueryResult;
use crate::schema::SchemaGraph;
use crate::sql::token::{Token, TokenStream};

/// One LEFT JOIN: target table under a deterministic alias, keyed against
/// the alias of the link before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub target_table: String,
    pub target_alias: String,
    pub target_key: String,
    pub origin_alias: String,
    pub origin_key: String,
}

impl Join {
    /// `LEFT JOIN table alias ON alias.target_key = origin_alias.origin_key`
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Left)
            .space()
            .push(Token::Join)
            .space()
            .push(Token::Ident(self.target_table.clone()))
            .space()
            .push(Token::Ident(self.target_alias.clone()))
            .space()
            .push(Token::On)
            .space()
            .push(Token::Ident(format!(
                "{}.{}",
                self.target_alias, self.target_key
            )))
            .space()
            .push(Token::Eq)
            .space()
            .push(Token::Ident(format!(
                "{}.{}",
                self.origin_alias, self.origin_key
            )));
        ts
    }
}

/// Joins keyed by alias, kept in insertion order.
///
/// Order matters: a join may reference the alias introduced by the join
/// before it, so emission must follow the order chains were walked in.
/// Deduplication by alias is safe because aliases are deterministic - a
/// repeated alias always describes the same join.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinMap {
    order: Vec<String>,
    joins: HashMap<String, Join>,
}

impl JoinMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, join: Join) {
        if !self.joins.contains_key(&join.target_alias) {
            self.order.push(join.target_alias.clone());
        }
        self.joins.insert(join.target_alias.clone(), join);
    }

    pub fn merge(&mut self, other: &JoinMap) {
        for join in other.iter() {
            self.insert(join.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Join> {
        self.order.iter().filter_map(|alias| self.joins.get(alias))
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }
}

/// Expands an association chain into its joins.
pub struct AssociationJoiner;

impl AssociationJoiner {
    /// Build the joins for a chain rooted at `root_table`. Returns the map
    /// and the alias of the chain's final target, which is what selections
    /// and projections qualify their columns with.
    pub fn build(
        schema: &SchemaGraph,
        root_table: &str,
        chain: &AssociationChain,
    ) -> QueryResult<(JoinMap, String)> {
        let mut joins = JoinMap::new();
        let mut origin_alias = root_table.to_owned();

        for (position, link) in chain.links.iter().enumerate() {
            let origin_table = schema.entity(&link.origin)?.table.clone();
            let target_table = schema.entity(&link.target)?.table.clone();
            let target_alias = format!("{}__{}_{}", origin_table, link.name, position);

            joins.insert(Join {
                target_table,
                target_alias: target_alias.clone(),
                target_key: link.target_key.clone(),
                origin_alias,
                origin_key: link.origin_key.clone(),
            });
            origin_alias = target_alias;
        }

        Ok((joins, origin_alias))
    }
}
