//! Statement assembly: SELECT, UPDATE and DELETE from queryset state.
//!
//! UPDATE and DELETE reuse the select machinery: the queryset's conditions
//! render as a subselect narrowed to the primary key, and the outer
//! statement targets rows whose key is IN that subselect. That keeps
//! multi-table conditions working on engines whose UPDATE has no joins.

use crate::error::{QueryError, QueryResult};
use crate::projection::Projection;
use crate::queryset::QuerySet;
use crate::sql::dialect::SqlDialect;
use crate::sql::token::{Token, TokenStream};
use crate::sql::RenderContext;

pub(crate) fn select(qs: &QuerySet, ctx: &RenderContext) -> QueryResult<String> {
    let entity = qs.schema.entity(&qs.entity)?;
    let table = entity.table.clone();

    let mut ts = TokenStream::new();
    ts.push(Token::Select).space();
    if qs.distinct {
        ts.push(Token::Distinct).space();
    }

    // Aggregation replaces the select list; an explicit projection narrows
    // it; otherwise all root columns plus any eager-loaded targets.
    if let Some(agg) = &qs.aggregation {
        ts.append(&agg.to_tokens(ctx)?);
    } else if let Some(proj) = &qs.projection {
        ts.append(&proj.to_tokens());
    } else {
        ts.push(Token::Ident(format!("{}.*", table)));
        if let Some(sr) = &qs.select_related {
            if !sr.is_empty() {
                ts.comma().space().append(&sr.to_tokens());
            }
        }
    }

    ts.newline()
        .push(Token::From)
        .space()
        .push(Token::Ident(table));

    for join in qs.left_joins().iter() {
        ts.newline().append(&join.to_tokens());
    }

    if qs.is_none {
        ts.newline()
            .push(Token::Where)
            .space()
            .push(Token::Raw("1 = 0".into()));
    } else if !qs.where_clause.is_empty() {
        ts.newline()
            .push(Token::Where)
            .space()
            .append(&qs.where_clause.to_tokens(ctx)?);
    }

    if let Some(order) = &qs.order {
        if !order.is_empty() {
            ts.newline()
                .push(Token::OrderBy)
                .space()
                .append(&order.to_tokens());
        }
    }

    if let Some(limit) = &qs.limit {
        ts.newline().append(&limit.to_tokens());
    }

    if qs.lock_for_update {
        if !ctx.dialect.supports_select_for_update() {
            return Err(QueryError::UnsupportedOnDialect {
                feature: "SELECT ... FOR UPDATE".into(),
                dialect: ctx.dialect.name().to_owned(),
            });
        }
        ts.newline().push(Token::ForUpdate);
    }

    Ok(ts.serialize(ctx))
}

/// The queryset narrowed to its primary key, rendered as the subselect
/// UPDATE/DELETE filter on.
fn key_subselect(qs: &QuerySet, ctx: &RenderContext) -> QueryResult<String> {
    let entity = qs.schema.entity(&qs.entity)?;
    let mut inner = qs.clone();
    inner.projection = Some(Projection::new(
        &qs.schema,
        &qs.entity,
        vec![entity.primary_key.as_str().into()],
    )?);
    inner.aggregation = None;
    inner.select_related = None;
    inner.lock_for_update = false;
    inner.assignments = Vec::new();
    select(&inner, ctx)
}

pub(crate) fn update(qs: &QuerySet, ctx: &RenderContext) -> QueryResult<String> {
    let entity = qs.schema.entity(&qs.entity)?;
    if qs.assignments.is_empty() {
        return Err(QueryError::MalformedValue {
            operator: "update".into(),
            reason: "no assignments staged".into(),
        });
    }

    let sub = key_subselect(qs, ctx)?;
    let mut ts = TokenStream::new();
    ts.push(Token::Update)
        .space()
        .push(Token::Ident(entity.table.clone()))
        .newline()
        .push(Token::Set)
        .space();
    for (i, assignment) in qs.assignments.iter().enumerate() {
        if i > 0 {
            ts.comma().space();
        }
        ts.append(&assignment.to_tokens(&qs.schema, entity)?);
    }
    ts.newline()
        .push(Token::Where)
        .space()
        .push(Token::Ident(format!(
            "{}.{}",
            entity.table, entity.primary_key
        )))
        .space()
        .push(Token::In)
        .space()
        .lparen()
        .push(Token::Raw(sub))
        .rparen();
    Ok(ts.serialize(ctx))
}

pub(crate) fn delete(qs: &QuerySet, ctx: &RenderContext) -> QueryResult<String> {
    let entity = qs.schema.entity(&qs.entity)?;
    let sub = key_subselect(qs, ctx)?;
    let mut ts = TokenStream::new();
    ts.push(Token::Delete)
        .space()
        .push(Token::From)
        .space()
        .push(Token::Ident(entity.table.clone()))
        .newline()
        .push(Token::Where)
        .space()
        .push(Token::Ident(format!(
            "{}.{}",
            entity.table, entity.primary_key
        )))
        .space()
        .push(Token::In)
        .space()
        .lparen()
        .push(Token::Raw(sub))
        .rparen();
    Ok(ts.serialize(ctx))
}
