//! The queryset: an immutable description of one query.
//!
//! Builder methods consume and return the queryset; cloning before a call
//! is the explicit way to branch. Anything resolvable against the schema
//! fails eagerly here; dialect-dependent checks wait for rendering, so one
//! queryset value can be rendered for several engines.

use std::sync::Arc;

use crate::aggregation::{AggSpec, Aggregation};
use crate::condition::{Disjunction, Filter, Where};
use crate::error::{QueryError, QueryResult};
use crate::join::JoinMap;
use crate::limit::Limit;
use crate::order::{Direction, Order};
use crate::projection::{ColumnSpec, Projection, Row};
use crate::schema::SchemaGraph;
use crate::select_related::SelectRelated;
use crate::set_ops::{SetOpType, SetOperation};
use crate::sql::render;
use crate::sql::RenderContext;
use crate::update::Assignment;

#[derive(Debug, Clone)]
pub struct QuerySet {
    pub(crate) schema: Arc<SchemaGraph>,
    pub(crate) entity: String,
    pub(crate) where_clause: Where,
    pub(crate) order: Option<Order>,
    pub(crate) limit: Option<Limit>,
    pub(crate) distinct: bool,
    pub(crate) lock_for_update: bool,
    pub(crate) is_none: bool,
    pub(crate) projection: Option<Projection>,
    pub(crate) aggregation: Option<Aggregation>,
    pub(crate) select_related: Option<SelectRelated>,
    pub(crate) assignments: Vec<Assignment>,
}

impl QuerySet {
    /// Start a queryset over all rows of an entity.
    pub fn new(schema: impl Into<Arc<SchemaGraph>>, entity: &str) -> QueryResult<Self> {
        let schema = schema.into();
        schema.entity(entity)?;
        Ok(Self {
            schema,
            entity: entity.to_owned(),
            where_clause: Where::default(),
            order: None,
            limit: None,
            distinct: false,
            lock_for_update: false,
            is_none: false,
            projection: None,
            aggregation: None,
            select_related: None,
            assignments: Vec::new(),
        })
    }

    // =========================================================================
    // Conditions
    // =========================================================================

    /// AND a filter onto the accumulated conditions.
    pub fn filter(mut self, filter: impl Into<Filter>) -> QueryResult<Self> {
        let disjunction = Disjunction::from_filter(&self.schema, &self.entity, filter.into())?;
        self.where_clause.include(disjunction);
        Ok(self)
    }

    /// AND a negated filter onto the accumulated conditions.
    pub fn exclude(mut self, filter: impl Into<Filter>) -> QueryResult<Self> {
        let disjunction = Disjunction::from_filter(&self.schema, &self.entity, filter.into())?;
        self.where_clause.exclude(disjunction);
        Ok(self)
    }

    /// Force an empty result: renders `WHERE 1 = 0`.
    #[must_use]
    pub fn none(mut self) -> Self {
        self.is_none = true;
        self
    }

    // =========================================================================
    // Shaping
    // =========================================================================

    /// Replace the ordering.
    pub fn order_by(mut self, terms: &[(&str, Direction)]) -> QueryResult<Self> {
        self.order = Some(Order::new(&self.schema, &self.entity, terms)?);
        Ok(self)
    }

    /// Flip every order direction. A no-op without an ordering.
    #[must_use]
    pub fn invert_order(mut self) -> Self {
        self.order = self.order.map(Order::invert);
        self
    }

    #[must_use]
    pub fn limit(mut self, size: u64, offset: u64) -> Self {
        self.limit = Some(Limit::new(size, offset));
        self
    }

    #[must_use]
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Render with `FOR UPDATE`. Fails at render time on engines without
    /// row locking.
    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.lock_for_update = true;
        self
    }

    /// Narrow the select list to the given columns.
    pub fn project<I, S>(mut self, specs: I) -> QueryResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<ColumnSpec>,
    {
        let specs: Vec<ColumnSpec> = specs.into_iter().map(Into::into).collect();
        self.projection = Some(Projection::new(&self.schema, &self.entity, specs)?);
        Ok(self)
    }

    /// Eager-load to-one relationships alongside the root columns.
    pub fn select_related(mut self, paths: &[&str]) -> QueryResult<Self> {
        self.select_related = Some(SelectRelated::new(&self.schema, &self.entity, paths)?);
        Ok(self)
    }

    /// Replace the select list with aggregate functions.
    pub fn aggregate(mut self, specs: Vec<AggSpec>) -> QueryResult<Self> {
        self.aggregation = Some(Aggregation::new(&self.schema, &self.entity, specs)?);
        Ok(self)
    }

    /// Stage SET assignments for [`render_update`](Self::render_update).
    #[must_use]
    pub fn update(mut self, assignments: Vec<Assignment>) -> Self {
        self.assignments = assignments;
        self
    }

    // =========================================================================
    // Set operations
    // =========================================================================

    pub fn union(self, other: QuerySet) -> SetOperation {
        SetOperation::new(self, SetOpType::Union, other)
    }

    pub fn intersection(self, other: QuerySet) -> SetOperation {
        SetOperation::new(self, SetOpType::Intersect, other)
    }

    pub fn difference(self, other: QuerySet) -> SetOperation {
        SetOperation::new(self, SetOpType::Except, other)
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    pub fn render_select(&self, ctx: &RenderContext) -> QueryResult<String> {
        render::select(self, ctx)
    }

    pub fn render_update(&self, ctx: &RenderContext) -> QueryResult<String> {
        render::update(self, ctx)
    }

    pub fn render_delete(&self, ctx: &RenderContext) -> QueryResult<String> {
        render::delete(self, ctx)
    }

    /// Run the projection's per-column transforms over fetched rows. A
    /// queryset without a projection returns the rows untouched.
    pub fn apply_transforms(&self, rows: Vec<Row>) -> Vec<Row> {
        match &self.projection {
            Some(proj) => proj.apply_transforms(rows),
            None => rows,
        }
    }

    /// All joins the queryset's parts require, in first-use order.
    pub(crate) fn left_joins(&self) -> JoinMap {
        let mut joins = JoinMap::new();
        self.where_clause.merge_joins_into(&mut joins);
        if let Some(order) = &self.order {
            order.merge_joins_into(&mut joins);
        }
        if let Some(agg) = &self.aggregation {
            agg.merge_joins_into(&mut joins);
        }
        if let Some(proj) = &self.projection {
            proj.merge_joins_into(&mut joins);
        }
        if let Some(sr) = &self.select_related {
            sr.merge_joins_into(&mut joins);
        }
        joins
    }
}

/// Check that a fetched result holds exactly one row and take it.
pub fn expect_single(rows: Vec<Row>) -> QueryResult<Row> {
    let mut rows = rows;
    match rows.len() {
        0 => Err(QueryError::NotFound),
        1 => Ok(rows.remove(0)),
        count => Err(QueryError::MultipleResults { count }),
    }
}
