//! Literal values a selection compares against.
//!
//! Date and time values are normalized to UTC before rendering and printed
//! in the `YYYY-MM-DD HH:MM:SS` database format, so the same queryset
//! renders the same bytes regardless of the process's local offset.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::error::{QueryError, QueryResult};
use crate::queryset::QuerySet;
use crate::sql::token::Token;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A literal comparison value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    List(Vec<Value>),
    /// Nested queryset, rendered as a subselect.
    Subquery(Box<QuerySet>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Truthiness for flag-style operators (`isnull`).
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            _ => true,
        }
    }

    /// Render this value as a single literal token. Lists and subqueries
    /// are shaped by their operators, never rendered as one literal.
    pub fn to_token(&self, operator: &str) -> QueryResult<Token> {
        match self {
            Value::Null => Ok(Token::Null),
            Value::Bool(b) => Ok(Token::LitBool(*b)),
            Value::Int(n) => Ok(Token::LitInt(*n)),
            Value::Float(f) if f.is_finite() => Ok(Token::LitFloat(*f)),
            Value::Float(_) => Err(QueryError::MalformedValue {
                operator: operator.to_owned(),
                reason: "non-finite float".into(),
            }),
            Value::Str(s) => Ok(Token::LitString(s.clone())),
            Value::Date(d) => Ok(Token::LitString(d.format(DATE_FORMAT).to_string())),
            Value::DateTime(dt) => Ok(Token::LitString(dt.format(DATETIME_FORMAT).to_string())),
            Value::List(_) => Err(QueryError::MalformedValue {
                operator: operator.to_owned(),
                reason: "list value where a scalar was expected".into(),
            }),
            Value::Subquery(_) => Err(QueryError::MalformedValue {
                operator: operator.to_owned(),
                reason: "subquery value where a scalar was expected".into(),
            }),
        }
    }

    /// The text a LIKE pattern is built from.
    pub fn pattern_text(&self, operator: &str) -> QueryResult<String> {
        match self {
            Value::Str(s) => Ok(s.clone()),
            Value::Int(n) => Ok(n.to_string()),
            _ => Err(QueryError::MalformedValue {
                operator: operator.to_owned(),
                reason: "pattern lookups take a string".into(),
            }),
        }
    }
}

/// UTC midnight opening the given day.
pub fn day_start(d: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&d.and_time(NaiveTime::MIN))
}

/// Last second of the given day, UTC.
pub fn day_end(d: NaiveDate) -> DateTime<Utc> {
    day_start(d) + Duration::seconds(86_399)
}

/// First and last second of a calendar year, UTC.
pub fn year_bounds(year: i32) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
    Some((day_start(start), day_end(end)))
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::Date(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl From<QuerySet> for Value {
    fn from(qs: QuerySet) -> Self {
        Value::Subquery(Box::new(qs))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or_default()),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Into::into).collect())
            }
            // Objects have no SQL literal form; keep their JSON text.
            other @ serde_json::Value::Object(_) => Value::Str(other.to_string()),
        }
    }
}
