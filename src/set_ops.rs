//! Set operations over querysets.
//!
//! Each side renders as a parenthesized subselect; the combinator is gated
//! per dialect at render time (MySQL only has UNION).

use crate::error::{QueryError, QueryResult};
use crate::queryset::QuerySet;
use crate::sql::dialect::SqlDialect;
use crate::sql::token::{Token, TokenStream};
use crate::sql::RenderContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOpType {
    Union,
    Intersect,
    Except,
}

impl SetOpType {
    pub fn name(&self) -> &'static str {
        match self {
            SetOpType::Union => "UNION",
            SetOpType::Intersect => "INTERSECT",
            SetOpType::Except => "EXCEPT",
        }
    }

    fn token(&self) -> Token {
        match self {
            SetOpType::Union => Token::Union,
            SetOpType::Intersect => Token::Intersect,
            SetOpType::Except => Token::Except,
        }
    }
}

/// Two querysets combined by a set operation.
#[derive(Debug, Clone)]
pub struct SetOperation {
    left: QuerySet,
    op: SetOpType,
    right: QuerySet,
}

impl SetOperation {
    pub fn new(left: QuerySet, op: SetOpType, right: QuerySet) -> Self {
        Self { left, op, right }
    }

    pub fn render(&self, ctx: &RenderContext) -> QueryResult<String> {
        if !ctx.dialect.supports_set_operation(self.op) {
            return Err(QueryError::UnsupportedSetOperation {
                operation: self.op.name().to_owned(),
                dialect: ctx.dialect.name().to_owned(),
            });
        }
        let mut ts = TokenStream::new();
        ts.lparen()
            .push(Token::Raw(self.left.render_select(ctx)?))
            .rparen()
            .newline()
            .push(self.op.token())
            .newline()
            .lparen()
            .push(Token::Raw(self.right.render_select(ctx)?))
            .rparen();
        Ok(ts.serialize(ctx))
    }
}
