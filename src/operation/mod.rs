//! Lookup operators: the closed set of comparisons a path can name.
//!
//! An operator is parsed once from the path's lexical suffix and dispatched
//! by exhaustive matching from then on. Value-shape checks happen at build
//! time in [`Operator::specialize`]; dialect-dependent spellings and gates
//! apply at render time in [`Operator::to_tokens`].

pub mod date;

pub use date::DatePart;

use chrono::Datelike;

use crate::error::{QueryError, QueryResult};
use crate::sql::dialect::{CaseInsensitiveRegex, SqlDialect};
use crate::sql::token::{Token, TokenStream};
use crate::sql::RenderContext;
use crate::value::{day_end, day_start, year_bounds, Value};

/// Scalar comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarOp {
    Equal,
    Different,
    Exact,
    IExact,
    In,
    IsNull,
    Lt,
    Lte,
    Gt,
    Gte,
    Between,
    StartsWith,
    IStartsWith,
    EndsWith,
    IEndsWith,
    Contains,
    IContains,
    Regex,
    IRegex,
}

impl ScalarOp {
    /// Resolve an operator name, including its aliases.
    pub fn parse(name: &str) -> Option<Self> {
        Some(match name {
            "equal" | "equals" | "equals_to" => ScalarOp::Equal,
            "different" => ScalarOp::Different,
            "exact" => ScalarOp::Exact,
            "iexact" => ScalarOp::IExact,
            "in" => ScalarOp::In,
            "isnull" => ScalarOp::IsNull,
            "lt" => ScalarOp::Lt,
            "lte" => ScalarOp::Lte,
            "gt" => ScalarOp::Gt,
            "gte" => ScalarOp::Gte,
            "between" | "range" => ScalarOp::Between,
            "startswith" => ScalarOp::StartsWith,
            "istartswith" => ScalarOp::IStartsWith,
            "endswith" => ScalarOp::EndsWith,
            "iendswith" => ScalarOp::IEndsWith,
            "contains" => ScalarOp::Contains,
            "icontains" => ScalarOp::IContains,
            "regex" => ScalarOp::Regex,
            "iregex" => ScalarOp::IRegex,
            _ => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalarOp::Equal => "equal",
            ScalarOp::Different => "different",
            ScalarOp::Exact => "exact",
            ScalarOp::IExact => "iexact",
            ScalarOp::In => "in",
            ScalarOp::IsNull => "isnull",
            ScalarOp::Lt => "lt",
            ScalarOp::Lte => "lte",
            ScalarOp::Gt => "gt",
            ScalarOp::Gte => "gte",
            ScalarOp::Between => "between",
            ScalarOp::StartsWith => "startswith",
            ScalarOp::IStartsWith => "istartswith",
            ScalarOp::EndsWith => "endswith",
            ScalarOp::IEndsWith => "iendswith",
            ScalarOp::Contains => "contains",
            ScalarOp::IContains => "icontains",
            ScalarOp::Regex => "regex",
            ScalarOp::IRegex => "iregex",
        }
    }
}

/// A parsed lookup operator: either a scalar comparison, or a date-part
/// extraction followed by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Scalar(ScalarOp),
    Date { part: DatePart, then: ScalarOp },
}

impl Operator {
    pub fn parse(name: &str, secondary: Option<&str>, path: &str) -> QueryResult<Self> {
        if let Some(op) = ScalarOp::parse(name) {
            if secondary.is_some() {
                return Err(QueryError::MalformedPath {
                    path: path.to_owned(),
                    reason: format!(
                        "secondary operator is only valid after a date part, not `{}`",
                        name
                    ),
                });
            }
            return Ok(Operator::Scalar(op));
        }
        if let Some(part) = DatePart::parse(name) {
            let then = match secondary {
                None => ScalarOp::Equal,
                Some(s) => ScalarOp::parse(s).ok_or_else(|| QueryError::UnknownOperator {
                    operator: s.to_owned(),
                    path: path.to_owned(),
                })?,
            };
            return Ok(Operator::Date { part, then });
        }
        Err(QueryError::UnknownOperator {
            operator: name.to_owned(),
            path: path.to_owned(),
        })
    }

    /// Rewrite operator/value pairs whose meaning depends on the value's
    /// shape, and validate values that can be checked without a dialect:
    /// - `equal` against a queryset becomes `in` (subselect)
    /// - `date` against a calendar date becomes BETWEEN the day's bounds
    /// - `year` against a calendar date becomes BETWEEN the year's bounds
    /// - regex patterns must compile
    pub fn specialize(self, value: Value) -> QueryResult<(Self, Value)> {
        match self {
            Operator::Scalar(ScalarOp::Equal) if matches!(value, Value::Subquery(_)) => {
                Ok((Operator::Scalar(ScalarOp::In), value))
            }
            Operator::Scalar(op @ (ScalarOp::Regex | ScalarOp::IRegex)) => {
                if let Value::Str(pattern) = &value {
                    regex::Regex::new(pattern).map_err(|e| QueryError::MalformedValue {
                        operator: op.name().to_owned(),
                        reason: e.to_string(),
                    })?;
                }
                Ok((self, value))
            }
            Operator::Date {
                part: DatePart::Date,
                then: ScalarOp::Equal,
            } => match value {
                Value::Date(d) => Ok((
                    Operator::Scalar(ScalarOp::Between),
                    Value::List(vec![
                        Value::DateTime(day_start(d)),
                        Value::DateTime(day_end(d)),
                    ]),
                )),
                other => Ok((self, other)),
            },
            Operator::Date {
                part: DatePart::Year,
                then: ScalarOp::Equal,
            } => match value {
                Value::Date(d) => {
                    let (start, end) =
                        year_bounds(d.year()).ok_or_else(|| QueryError::MalformedValue {
                            operator: "year".into(),
                            reason: "year out of range".into(),
                        })?;
                    Ok((
                        Operator::Scalar(ScalarOp::Between),
                        Value::List(vec![start.into(), end.into()]),
                    ))
                }
                other => Ok((self, other)),
            },
            _ => Ok((self, value)),
        }
    }

    /// Render `field <comparison> value` for the given context. `field` is
    /// a compiler-generated reference (`alias.column`), never user input.
    pub fn to_tokens(
        &self,
        field: &str,
        value: &Value,
        ctx: &RenderContext,
    ) -> QueryResult<TokenStream> {
        match self {
            Operator::Scalar(op) => scalar_tokens(*op, field, value, ctx),
            Operator::Date { part, then } => {
                let wrapped = ctx.dialect.date_part_sql(*part, field).ok_or_else(|| {
                    QueryError::UnsupportedOnDialect {
                        feature: format!("date lookup `{}`", part.name()),
                        dialect: ctx.dialect.name().to_owned(),
                    }
                })?;
                let comparand = if ctx.dialect.zero_pads_date_parts() {
                    match value {
                        Value::Int(n) => Value::Str(part.zero_pad(*n)),
                        other => other.clone(),
                    }
                } else {
                    value.clone()
                };
                scalar_tokens(*then, &wrapped, &comparand, ctx)
            }
        }
    }
}

// =============================================================================
// Scalar rendering
// =============================================================================

fn scalar_tokens(
    op: ScalarOp,
    field: &str,
    value: &Value,
    ctx: &RenderContext,
) -> QueryResult<TokenStream> {
    match op {
        ScalarOp::Equal => match value {
            Value::Null => Ok(null_check(field, true)),
            Value::Subquery(_) => scalar_tokens(ScalarOp::In, field, value, ctx),
            _ => binary_tokens(field, Token::Eq, value, "equal"),
        },
        ScalarOp::Different => match value {
            Value::Null => Ok(null_check(field, false)),
            _ => binary_tokens(field, Token::Ne, value, "different"),
        },
        ScalarOp::Exact => match value {
            Value::Null => Ok(null_check(field, true)),
            _ => binary_tokens(field, Token::Like, value, "exact"),
        },
        ScalarOp::IExact => match value {
            Value::Null => Ok(null_check(field, true)),
            _ => binary_tokens(
                field,
                Token::Raw(ctx.dialect.case_insensitive_like().to_owned()),
                value,
                "iexact",
            ),
        },
        ScalarOp::In => in_tokens(field, value, ctx),
        ScalarOp::IsNull => Ok(null_check(field, value.truthy())),
        ScalarOp::Lt => binary_tokens(field, Token::Lt, value, "lt"),
        ScalarOp::Lte => binary_tokens(field, Token::Lte, value, "lte"),
        ScalarOp::Gt => binary_tokens(field, Token::Gt, value, "gt"),
        ScalarOp::Gte => binary_tokens(field, Token::Gte, value, "gte"),
        ScalarOp::Between => between_tokens(field, value),
        ScalarOp::StartsWith => pattern_tokens(field, value, ctx, op, Affix::Suffix),
        ScalarOp::IStartsWith => pattern_tokens(field, value, ctx, op, Affix::Suffix),
        ScalarOp::EndsWith => pattern_tokens(field, value, ctx, op, Affix::Prefix),
        ScalarOp::IEndsWith => pattern_tokens(field, value, ctx, op, Affix::Prefix),
        ScalarOp::Contains => pattern_tokens(field, value, ctx, op, Affix::Both),
        ScalarOp::IContains => pattern_tokens(field, value, ctx, op, Affix::Both),
        ScalarOp::Regex => regex_tokens(field, value, ctx),
        ScalarOp::IRegex => iregex_tokens(field, value, ctx),
    }
}

fn null_check(field: &str, is_null: bool) -> TokenStream {
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned())).space().push(if is_null {
        Token::IsNull
    } else {
        Token::IsNotNull
    });
    ts
}

fn binary_tokens(field: &str, op: Token, value: &Value, name: &str) -> QueryResult<TokenStream> {
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned()))
        .space()
        .push(op)
        .space()
        .push(value.to_token(name)?);
    Ok(ts)
}

fn in_tokens(field: &str, value: &Value, ctx: &RenderContext) -> QueryResult<TokenStream> {
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned()))
        .space()
        .push(Token::In)
        .space()
        .lparen();
    match value {
        Value::List(items) => {
            if items.is_empty() {
                return Err(QueryError::MalformedValue {
                    operator: "in".into(),
                    reason: "empty list".into(),
                });
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    ts.comma().space();
                }
                ts.push(item.to_token("in")?);
            }
        }
        Value::Subquery(qs) => {
            ts.push(Token::Raw(qs.render_select(ctx)?));
        }
        scalar => {
            ts.push(scalar.to_token("in")?);
        }
    }
    ts.rparen();
    Ok(ts)
}

fn between_tokens(field: &str, value: &Value) -> QueryResult<TokenStream> {
    let bounds = match value {
        Value::List(items) if items.len() == 2 => items,
        _ => {
            return Err(QueryError::MalformedValue {
                operator: "between".into(),
                reason: "expected a two-element list".into(),
            })
        }
    };
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned()))
        .space()
        .push(Token::Between)
        .space()
        .push(bounds[0].to_token("between")?)
        .space()
        .push(Token::And)
        .space()
        .push(bounds[1].to_token("between")?);
    Ok(ts)
}

enum Affix {
    Prefix,
    Suffix,
    Both,
}

/// Escape LIKE wildcard metacharacters in user text.
fn escape_like_wildcards(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn pattern_tokens(
    field: &str,
    value: &Value,
    ctx: &RenderContext,
    op: ScalarOp,
    affix: Affix,
) -> QueryResult<TokenStream> {
    let text = value.pattern_text(op.name())?;
    let escaped = escape_like_wildcards(&text);
    let needs_escape_clause = escaped != text && ctx.dialect.like_requires_escape_clause();
    let pattern = match affix {
        Affix::Prefix => format!("%{}", escaped),
        Affix::Suffix => format!("{}%", escaped),
        Affix::Both => format!("%{}%", escaped),
    };

    let keyword = match op {
        ScalarOp::IStartsWith | ScalarOp::IEndsWith | ScalarOp::IContains => {
            Token::Raw(ctx.dialect.case_insensitive_like().to_owned())
        }
        _ => Token::Like,
    };

    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned()))
        .space()
        .push(keyword)
        .space()
        .push(Token::LitString(pattern));
    if needs_escape_clause {
        ts.space()
            .push(Token::Escape)
            .space()
            .push(Token::Raw("'\\'".to_owned()));
    }
    Ok(ts)
}

fn regex_pattern(value: &Value) -> QueryResult<String> {
    match value {
        Value::Str(p) => Ok(p.clone()),
        _ => Err(QueryError::MalformedValue {
            operator: "regex".into(),
            reason: "regex lookups take a string pattern".into(),
        }),
    }
}

fn regex_tokens(field: &str, value: &Value, ctx: &RenderContext) -> QueryResult<TokenStream> {
    let pattern = regex_pattern(value)?;
    let op = ctx
        .dialect
        .regex_operator()
        .ok_or_else(|| QueryError::UnsupportedOnDialect {
            feature: "regex lookup".into(),
            dialect: ctx.dialect.name().to_owned(),
        })?;
    let mut ts = TokenStream::new();
    ts.push(Token::Raw(field.to_owned()))
        .space()
        .push(Token::Raw(op.to_owned()))
        .space()
        .push(Token::LitString(pattern));
    Ok(ts)
}

fn iregex_tokens(field: &str, value: &Value, ctx: &RenderContext) -> QueryResult<TokenStream> {
    let pattern = regex_pattern(value)?;
    let strategy =
        ctx.dialect
            .case_insensitive_regex()
            .ok_or_else(|| QueryError::UnsupportedOnDialect {
                feature: "case-insensitive regex lookup".into(),
                dialect: ctx.dialect.name().to_owned(),
            })?;
    let mut ts = TokenStream::new();
    match strategy {
        CaseInsensitiveRegex::Native(op) => {
            ts.push(Token::Raw(field.to_owned()))
                .space()
                .push(Token::Raw(op.to_owned()))
                .space()
                .push(Token::LitString(pattern));
        }
        CaseInsensitiveRegex::LowerBothSides(op) => {
            ts.push(Token::Raw(format!("LOWER({})", field)))
                .space()
                .push(Token::Raw(op.to_owned()))
                .space()
                .push(Token::LitString(pattern.to_lowercase()));
        }
        CaseInsensitiveRegex::InlineFlag(op) => {
            ts.push(Token::Raw(field.to_owned()))
                .space()
                .push(Token::Raw(op.to_owned()))
                .space()
                .push(Token::LitString(format!("(?i){}", pattern)));
        }
    }
    Ok(ts)
}
