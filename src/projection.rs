//! Column projections and client-side row transforms.
//!
//! A projection narrows the select list to named paths. Each projected
//! column can carry an alias and an optional transform, applied to the
//! opaque row values a driver hands back after executing the statement.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::QueryResult;
use crate::field::ResolvedField;
use crate::join::JoinMap;
use crate::path::ParsedPath;
use crate::schema::SchemaGraph;
use crate::sql::token::{Token, TokenStream};

/// A fetched row, keyed by projected column name.
pub type Row = HashMap<String, serde_json::Value>;

/// A client-side transform applied to one projected column.
pub type Transform = Arc<dyn Fn(serde_json::Value) -> serde_json::Value + Send + Sync>;

/// One requested projection column: path, optional alias and transform.
#[derive(Clone)]
pub struct ColumnSpec {
    path: String,
    alias: Option<String>,
    transform: Option<Transform>,
}

/// Start a projection column from a path.
pub fn col(path: impl Into<String>) -> ColumnSpec {
    ColumnSpec {
        path: path.into(),
        alias: None,
        transform: None,
    }
}

impl ColumnSpec {
    #[must_use]
    pub fn named(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Attach a transform applied to this column of every fetched row.
    #[must_use]
    pub fn map<F>(mut self, f: F) -> Self
    where
        F: Fn(serde_json::Value) -> serde_json::Value + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }
}

impl From<&str> for ColumnSpec {
    fn from(path: &str) -> Self {
        col(path)
    }
}

impl From<String> for ColumnSpec {
    fn from(path: String) -> Self {
        col(path)
    }
}

impl fmt::Debug for ColumnSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("path", &self.path)
            .field("alias", &self.alias)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[derive(Clone)]
struct ProjectedField {
    field: ResolvedField,
    alias: String,
    transform: Option<Transform>,
}

impl fmt::Debug for ProjectedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectedField")
            .field("field", &self.field)
            .field("alias", &self.alias)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// The resolved select list of a projected query.
#[derive(Debug, Clone, Default)]
pub struct Projection {
    fields: Vec<ProjectedField>,
}

impl Projection {
    pub fn new(
        schema: &SchemaGraph,
        entity: &str,
        specs: Vec<ColumnSpec>,
    ) -> QueryResult<Self> {
        let mut fields = Vec::with_capacity(specs.len());
        for spec in specs {
            let parsed = ParsedPath::parse(&spec.path)?;
            let field = ResolvedField::resolve(schema, entity, &parsed, &spec.path)?;
            let alias = spec.alias.unwrap_or_else(|| parsed.field.clone());
            fields.push(ProjectedField {
                field,
                alias,
                transform: spec.transform,
            });
        }
        Ok(Self { fields })
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for f in &self.fields {
            joins.merge(&f.field.joins);
        }
    }

    /// `alias.column, other.column AS name` - the AS clause appears only
    /// when the alias differs from the column name.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        for (i, f) in self.fields.iter().enumerate() {
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Ident(f.field.qualified()));
            if f.alias != f.field.column {
                ts.space().push(Token::As).space().push(Token::Ident(f.alias.clone()));
            }
        }
        ts
    }

    /// Apply the per-column transforms to fetched rows.
    pub fn apply_transforms(&self, mut rows: Vec<Row>) -> Vec<Row> {
        for row in &mut rows {
            for f in &self.fields {
                if let Some(transform) = &f.transform {
                    if let Some(value) = row.remove(&f.alias) {
                        row.insert(f.alias.clone(), transform(value));
                    }
                }
            }
        }
        rows
    }
}
