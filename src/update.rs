//! UPDATE assignments.
//!
//! An assignment sets a column to a literal, shifts it arithmetically
//! against its current value, or replaces it with a trusted SQL
//! expression. Field names resolve through the schema like any other
//! local field, so `zone` assigns the `zone_id` column.

use crate::error::QueryResult;
use crate::schema::{EntityDef, SchemaGraph};
use crate::sql::token::{Token, TokenStream};
use crate::value::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl ArithOp {
    fn token(self) -> Token {
        match self {
            ArithOp::Add => Token::Plus,
            ArithOp::Sub => Token::Minus,
            ArithOp::Mul => Token::Mul,
            ArithOp::Div => Token::Div,
        }
    }
}

/// One SET clause entry.
#[derive(Debug, Clone)]
pub enum Assignment {
    /// `column = literal`
    Set { field: String, value: Value },
    /// `column = column <op> operand`
    Arith {
        field: String,
        op: ArithOp,
        operand: Value,
    },
    /// `column = <expression>` - the expression is emitted verbatim, so it
    /// must be trusted, static SQL (`ABS(stars)`), never user input.
    Expr { field: String, sql: String },
}

impl Assignment {
    pub fn set(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Assignment::Set {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn incr(field: impl Into<String>, by: impl Into<Value>) -> Self {
        Assignment::Arith {
            field: field.into(),
            op: ArithOp::Add,
            operand: by.into(),
        }
    }

    pub fn decr(field: impl Into<String>, by: impl Into<Value>) -> Self {
        Assignment::Arith {
            field: field.into(),
            op: ArithOp::Sub,
            operand: by.into(),
        }
    }

    pub fn mul(field: impl Into<String>, by: impl Into<Value>) -> Self {
        Assignment::Arith {
            field: field.into(),
            op: ArithOp::Mul,
            operand: by.into(),
        }
    }

    pub fn div(field: impl Into<String>, by: impl Into<Value>) -> Self {
        Assignment::Arith {
            field: field.into(),
            op: ArithOp::Div,
            operand: by.into(),
        }
    }

    pub fn expr(field: impl Into<String>, sql: impl Into<String>) -> Self {
        Assignment::Expr {
            field: field.into(),
            sql: sql.into(),
        }
    }

    /// `column = ...`. UPDATE targets the root table directly, so columns
    /// are unqualified.
    pub fn to_tokens(
        &self,
        schema: &SchemaGraph,
        entity: &EntityDef,
    ) -> QueryResult<TokenStream> {
        let mut ts = TokenStream::new();
        match self {
            Assignment::Set { field, value } => {
                let column = schema.resolve_column(entity, field)?;
                ts.push(Token::Ident(column))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(value.to_token("set")?);
            }
            Assignment::Arith { field, op, operand } => {
                let column = schema.resolve_column(entity, field)?;
                ts.push(Token::Ident(column.clone()))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::Ident(column))
                    .space()
                    .push(op.token())
                    .space()
                    .push(operand.to_token("set")?);
            }
            Assignment::Expr { field, sql } => {
                let column = schema.resolve_column(entity, field)?;
                ts.push(Token::Ident(column))
                    .space()
                    .push(Token::Eq)
                    .space()
                    .push(Token::Raw(sql.clone()));
            }
        }
        Ok(ts)
    }
}
