//! Lexical parsing of selection paths.
//!
//! A path is `hop::hop::field__operator__secondary`, where every part after
//! the field is optional. `::` separates relationship hops, `__` separates
//! the field from its operator and an optional secondary operator (used by
//! date-part lookups such as `created_at__year__gte`). Parsing here is
//! purely lexical; names are checked against the schema later.

use crate::error::{QueryError, QueryResult};

pub const RELATIONSHIP_SEPARATOR: &str = "::";
pub const OPERATOR_SEPARATOR: &str = "__";

/// The lexical pieces of a selection path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPath {
    /// Relationship hops, outermost first. Empty for a local path.
    pub hops: Vec<String>,
    pub field: String,
    /// Operator name; defaults to `equal` when the path carries none.
    pub operator: String,
    pub secondary: Option<String>,
}

impl ParsedPath {
    pub fn parse(path: &str) -> QueryResult<Self> {
        let mut hops: Vec<String> = path
            .split(RELATIONSHIP_SEPARATOR)
            .map(str::to_owned)
            .collect();
        let last = hops.pop().unwrap_or_default();

        if hops.iter().any(String::is_empty) {
            return Err(QueryError::MalformedPath {
                path: path.to_owned(),
                reason: "empty relationship hop".into(),
            });
        }

        let mut parts = last.splitn(3, OPERATOR_SEPARATOR);
        let field = parts.next().unwrap_or_default().to_owned();
        if field.is_empty() {
            return Err(QueryError::MalformedPath {
                path: path.to_owned(),
                reason: "empty field segment".into(),
            });
        }

        let operator = match parts.next() {
            Some("") | None => "equal".to_owned(),
            Some(op) => op.to_owned(),
        };
        let secondary = parts.next().filter(|s| !s.is_empty()).map(str::to_owned);

        Ok(Self {
            hops,
            field,
            operator,
            secondary,
        })
    }

    pub fn is_local(&self) -> bool {
        self.hops.is_empty()
    }
}
