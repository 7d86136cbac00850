//! Aggregations over the filtered row set.
//!
//! An aggregation replaces the select list wholesale: the query returns a
//! single row of named aggregate columns. There is no GROUP BY; aggregates
//! always summarize the entire filtered set.

use crate::error::{QueryError, QueryResult};
use crate::field::ResolvedField;
use crate::join::JoinMap;
use crate::path::ParsedPath;
use crate::schema::SchemaGraph;
use crate::sql::dialect::SqlDialect;
use crate::sql::token::{Token, TokenStream};
use crate::sql::RenderContext;

/// The supported aggregate functions. The statistical ones are gated to
/// engines that implement them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggFunc {
    Count,
    Sum,
    Avg,
    Max,
    Min,
    StdDevPop,
    StdDevSamp,
    VarPop,
    VarSamp,
}

impl AggFunc {
    pub fn sql_name(&self) -> &'static str {
        match self {
            AggFunc::Count => "COUNT",
            AggFunc::Sum => "SUM",
            AggFunc::Avg => "AVG",
            AggFunc::Max => "MAX",
            AggFunc::Min => "MIN",
            AggFunc::StdDevPop => "STDDEV_POP",
            AggFunc::StdDevSamp => "STDDEV_SAMP",
            AggFunc::VarPop => "VAR_POP",
            AggFunc::VarSamp => "VAR_SAMP",
        }
    }

    /// Lowercase name used in default result aliases.
    pub fn name(&self) -> &'static str {
        match self {
            AggFunc::Count => "count",
            AggFunc::Sum => "sum",
            AggFunc::Avg => "avg",
            AggFunc::Max => "max",
            AggFunc::Min => "min",
            AggFunc::StdDevPop => "stddev_pop",
            AggFunc::StdDevSamp => "stddev_samp",
            AggFunc::VarPop => "var_pop",
            AggFunc::VarSamp => "var_samp",
        }
    }

    /// Count/Sum/Avg/Max/Min - present on every engine.
    pub fn is_basic(&self) -> bool {
        matches!(
            self,
            AggFunc::Count | AggFunc::Sum | AggFunc::Avg | AggFunc::Max | AggFunc::Min
        )
    }
}

/// One requested aggregate: function, path, optional result name.
#[derive(Debug, Clone)]
pub struct AggSpec {
    func: AggFunc,
    path: String,
    name: Option<String>,
}

impl AggSpec {
    pub fn new(func: AggFunc, path: impl Into<String>) -> Self {
        Self {
            func,
            path: path.into(),
            name: None,
        }
    }

    /// Override the default `<alias>__<func>` result name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

pub fn count(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::Count, path)
}
pub fn sum(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::Sum, path)
}
pub fn avg(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::Avg, path)
}
pub fn max(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::Max, path)
}
pub fn min(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::Min, path)
}
pub fn std_dev_pop(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::StdDevPop, path)
}
pub fn std_dev_samp(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::StdDevSamp, path)
}
pub fn var_pop(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::VarPop, path)
}
pub fn var_samp(path: impl Into<String>) -> AggSpec {
    AggSpec::new(AggFunc::VarSamp, path)
}

#[derive(Debug, Clone)]
struct AggregationField {
    name: String,
    func: AggFunc,
    field: ResolvedField,
}

/// The resolved aggregate select list.
#[derive(Debug, Clone)]
pub struct Aggregation {
    fields: Vec<AggregationField>,
}

impl Aggregation {
    pub fn new(schema: &SchemaGraph, entity: &str, specs: Vec<AggSpec>) -> QueryResult<Self> {
        let mut fields = Vec::with_capacity(specs.len());
        for spec in specs {
            let parsed = ParsedPath::parse(&spec.path)?;
            let field = ResolvedField::resolve(schema, entity, &parsed, &spec.path)?;
            let name = spec
                .name
                .unwrap_or_else(|| format!("{}__{}", field.table_alias, spec.func.name()));
            fields.push(AggregationField {
                name,
                func: spec.func,
                field,
            });
        }
        Ok(Self { fields })
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for f in &self.fields {
            joins.merge(&f.field.joins);
        }
    }

    /// `SUM(users.stars) AS users__sum, ...`
    pub fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        for (i, f) in self.fields.iter().enumerate() {
            if !ctx.dialect.supports_aggregate(f.func) {
                return Err(QueryError::UnsupportedOnDialect {
                    feature: format!("aggregate function {}", f.func.sql_name()),
                    dialect: ctx.dialect.name().to_owned(),
                });
            }
            if i > 0 {
                ts.comma().space();
            }
            ts.push(Token::Raw(format!(
                "{}({})",
                f.func.sql_name(),
                f.field.qualified()
            )))
            .space()
            .push(Token::As)
            .space()
            .push(Token::Ident(f.name.clone()));
        }
        Ok(ts)
    }
}
