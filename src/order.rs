//! ORDER BY terms.
//!
//! Order paths resolve through the same machinery as filters, so ordering
//! by a foreign field contributes the joins its hops require. Inversion
//! flips every direction and is its own inverse.

use crate::error::QueryResult;
use crate::field::ResolvedField;
use crate::join::JoinMap;
use crate::path::ParsedPath;
use crate::schema::SchemaGraph;
use crate::sql::token::{Token, TokenStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn invert(self) -> Self {
        match self {
            Direction::Asc => Direction::Desc,
            Direction::Desc => Direction::Asc,
        }
    }

    fn token(self) -> Token {
        match self {
            Direction::Asc => Token::Asc,
            Direction::Desc => Token::Desc,
        }
    }
}

#[derive(Debug, Clone)]
struct OrderField {
    field: ResolvedField,
    direction: Direction,
}

/// The accumulated ORDER BY clause.
#[derive(Debug, Clone, Default)]
pub struct Order {
    fields: Vec<OrderField>,
}

impl Order {
    pub fn new(
        schema: &SchemaGraph,
        entity: &str,
        terms: &[(&str, Direction)],
    ) -> QueryResult<Self> {
        let mut fields = Vec::with_capacity(terms.len());
        for (path, direction) in terms {
            let parsed = ParsedPath::parse(path)?;
            let field = ResolvedField::resolve(schema, entity, &parsed, path)?;
            fields.push(OrderField {
                field,
                direction: *direction,
            });
        }
        Ok(Self { fields })
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn invert(mut self) -> Self {
        for f in &mut self.fields {
            f.direction = f.direction.invert();
        }
        self
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for f in &self.fields {
            joins.merge(&f.field.joins);
        }
    }

    /// `alias.column ASC, other.column DESC` - without the ORDER BY keyword.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        for (i, f) in self.fields.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(f.field.qualified()))
                .space()
                .push(f.direction.token());
        }
        ts
    }
}
