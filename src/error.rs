//! Error taxonomy for path resolution, value validation and SQL rendering.
//!
//! Builder methods fail eagerly: anything that can be checked against the
//! schema (paths, relationships, operators) errors when the clause is added.
//! Dialect-dependent checks (regex support, set operations, row locking)
//! surface at render time, when the dialect is known.

use thiserror::Error;

/// Errors that can occur while building or rendering a query.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("malformed selection path `{path}`: {reason}")]
    MalformedPath { path: String, reason: String },

    #[error("unknown entity `{entity}`")]
    UnknownEntity { entity: String },

    #[error("bad selection path `{path}`: `{entity}` has no relationship `{hop}`")]
    UnknownRelationship {
        path: String,
        entity: String,
        hop: String,
    },

    #[error("entity `{entity}` has no field `{field}`")]
    UnknownField { entity: String, field: String },

    #[error(
        "relationship `{relationship}` of `{entity}` is a keyless many-to-many; \
         declare the intermediate entity and use a through relationship"
    )]
    UnsupportedRelationship { entity: String, relationship: String },

    #[error("unknown operator `{operator}` in selection path `{path}`")]
    UnknownOperator { operator: String, path: String },

    #[error("{feature} is not supported on dialect `{dialect}`")]
    UnsupportedOnDialect { feature: String, dialect: String },

    #[error("set operation {operation} is not supported on dialect `{dialect}`")]
    UnsupportedSetOperation { operation: String, dialect: String },

    #[error("malformed value for operator `{operator}`: {reason}")]
    MalformedValue { operator: String, reason: String },

    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    #[error("no rows matched")]
    NotFound,

    #[error("expected exactly one row, got {count}")]
    MultipleResults { count: usize },
}

pub type QueryResult<T> = Result<T, QueryError>;
