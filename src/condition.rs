//! Filter conditions in disjunctive normal form.
//!
//! A [`Filter`] is what callers hand to `filter`/`exclude`: one AND group,
//! or several groups OR'd together. Each call produces a [`Disjunction`]
//! that the [`Where`] clause ANDs with everything accumulated so far;
//! exclusions render under a `NOT (...)` wrapper.

use crate::error::QueryResult;
use crate::field::ResolvedField;
use crate::join::JoinMap;
use crate::operation::Operator;
use crate::path::ParsedPath;
use crate::schema::SchemaGraph;
use crate::sql::token::{Token, TokenStream};
use crate::sql::RenderContext;
use crate::value::Value;

// =============================================================================
// Filter (caller-facing argument)
// =============================================================================

/// A filter argument: either a single implicit-AND group of path/value
/// pairs, or several such groups OR'd together.
#[derive(Debug, Clone)]
pub enum Filter {
    All(Vec<(String, Value)>),
    Any(Vec<Vec<(String, Value)>>),
}

impl Filter {
    pub fn all<K, V, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Filter::All(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn any<K, V, G, I>(groups: I) -> Self
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Filter::Any(
            groups
                .into_iter()
                .map(|group| {
                    group
                        .into_iter()
                        .map(|(k, v)| (k.into(), v.into()))
                        .collect()
                })
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Filter {
    fn from(pairs: [(K, V); N]) -> Self {
        Filter::all(pairs)
    }
}

impl<K: Into<String>, V: Into<Value>> From<Vec<(K, V)>> for Filter {
    fn from(pairs: Vec<(K, V)>) -> Self {
        Filter::all(pairs)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// One path/value pair, resolved against the schema: the field it reads,
/// the operator the path named, and the (possibly rewritten) value.
#[derive(Debug, Clone)]
pub struct Selection {
    field: ResolvedField,
    operator: Operator,
    value: Value,
}

impl Selection {
    pub fn new(
        schema: &SchemaGraph,
        entity: &str,
        path: &str,
        value: Value,
    ) -> QueryResult<Self> {
        let parsed = ParsedPath::parse(path)?;
        let operator = Operator::parse(&parsed.operator, parsed.secondary.as_deref(), path)?;
        let (operator, value) = operator.specialize(value)?;
        let field = ResolvedField::resolve(schema, entity, &parsed, path)?;
        Ok(Self {
            field,
            operator,
            value,
        })
    }

    pub fn joins(&self) -> &JoinMap {
        &self.field.joins
    }

    pub fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        self.operator
            .to_tokens(&self.field.qualified(), &self.value, ctx)
    }
}

// =============================================================================
// Conjunction / Disjunction
// =============================================================================

/// Selections joined by AND.
#[derive(Debug, Clone)]
pub struct Conjunction {
    selections: Vec<Selection>,
}

impl Conjunction {
    pub fn new(
        schema: &SchemaGraph,
        entity: &str,
        pairs: Vec<(String, Value)>,
    ) -> QueryResult<Self> {
        let selections = pairs
            .into_iter()
            .map(|(path, value)| Selection::new(schema, entity, &path, value))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self { selections })
    }

    fn selection_count(&self) -> usize {
        self.selections.len()
    }

    fn merge_joins_into(&self, joins: &mut JoinMap) {
        for sel in &self.selections {
            joins.merge(sel.joins());
        }
    }

    /// Selections joined by AND, no surrounding parens.
    fn to_tokens_flat(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        for (i, sel) in self.selections.iter().enumerate() {
            if i > 0 {
                ts.space().push(Token::And).space();
            }
            ts.append(&sel.to_tokens(ctx)?);
        }
        Ok(ts)
    }

    fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        if self.selections.len() <= 1 {
            return self.to_tokens_flat(ctx);
        }
        let mut ts = TokenStream::new();
        ts.lparen().append(&self.to_tokens_flat(ctx)?).rparen();
        Ok(ts)
    }
}

/// Conjunctions joined by OR - the unit `filter`/`exclude` appends.
#[derive(Debug, Clone)]
pub struct Disjunction {
    conjunctions: Vec<Conjunction>,
}

impl Disjunction {
    pub fn from_filter(
        schema: &SchemaGraph,
        entity: &str,
        filter: Filter,
    ) -> QueryResult<Self> {
        let groups = match filter {
            Filter::All(pairs) => vec![pairs],
            Filter::Any(groups) => groups,
        };
        let conjunctions = groups
            .into_iter()
            .map(|pairs| Conjunction::new(schema, entity, pairs))
            .collect::<QueryResult<Vec<_>>>()?;
        Ok(Self { conjunctions })
    }

    fn selection_count(&self) -> usize {
        self.conjunctions.iter().map(Conjunction::selection_count).sum()
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for conj in &self.conjunctions {
            conj.merge_joins_into(joins);
        }
    }

    /// Conjunctions joined by OR without this disjunction's own parens.
    /// Multi-selection conjunctions keep theirs.
    fn to_tokens_flat(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        if self.conjunctions.len() == 1 {
            return self.conjunctions[0].to_tokens_flat(ctx);
        }
        let mut ts = TokenStream::new();
        for (i, conj) in self.conjunctions.iter().enumerate() {
            if i > 0 {
                ts.space().push(Token::Or).space();
            }
            ts.append(&conj.to_tokens(ctx)?);
        }
        Ok(ts)
    }

    pub fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        if self.selection_count() <= 1 {
            return self.to_tokens_flat(ctx);
        }
        let mut ts = TokenStream::new();
        ts.lparen().append(&self.to_tokens_flat(ctx)?).rparen();
        Ok(ts)
    }

    /// `NOT (...)` form used for exclusions.
    pub fn to_negated_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        ts.push(Token::Not)
            .space()
            .lparen()
            .append(&self.to_tokens_flat(ctx)?)
            .rparen();
        Ok(ts)
    }
}

// =============================================================================
// Where
// =============================================================================

/// The accumulated WHERE clause: inclusion and exclusion disjunctions,
/// all joined by AND.
#[derive(Debug, Clone, Default)]
pub struct Where {
    inclusion: Vec<Disjunction>,
    exclusion: Vec<Disjunction>,
}

impl Where {
    pub fn include(&mut self, disjunction: Disjunction) {
        self.inclusion.push(disjunction);
    }

    pub fn exclude(&mut self, disjunction: Disjunction) {
        self.exclusion.push(disjunction);
    }

    pub fn is_empty(&self) -> bool {
        self.inclusion.is_empty() && self.exclusion.is_empty()
    }

    pub fn merge_joins_into(&self, joins: &mut JoinMap) {
        for disj in self.inclusion.iter().chain(&self.exclusion) {
            disj.merge_joins_into(joins);
        }
    }

    pub fn to_tokens(&self, ctx: &RenderContext) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        let mut first = true;
        for disj in &self.inclusion {
            if !first {
                ts.space().push(Token::And).space();
            }
            ts.append(&disj.to_tokens(ctx)?);
            first = false;
        }
        for disj in &self.exclusion {
            if !first {
                ts.space().push(Token::And).space();
            }
            ts.append(&disj.to_negated_tokens(ctx)?);
            first = false;
        }
        Ok(ts)
    }
}
