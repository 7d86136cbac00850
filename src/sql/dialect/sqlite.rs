//! SQLite SQL dialect.
//!
//! SQLite differences that matter here:
//! - No EXTRACT; date parts go through `strftime` and compare as
//!   zero-padded text
//! - `REGEXP` needs an application-registered function; case-insensitivity
//!   is expressed with an inline `(?i)` flag
//! - LIKE has no default escape character, so escaped wildcards need an
//!   explicit ESCAPE clause
//! - No row locking (FOR UPDATE is rejected)
//! - No statistical aggregates

use super::helpers;
use super::{CaseInsensitiveRegex, SqlDialect};
use crate::operation::date::DatePart;
use crate::set_ops::SetOpType;

/// SQLite SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Sqlite;

impl SqlDialect for Sqlite {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    fn like_requires_escape_clause(&self) -> bool {
        true
    }

    fn regex_operator(&self) -> Option<&'static str> {
        Some("REGEXP")
    }

    fn case_insensitive_regex(&self) -> Option<CaseInsensitiveRegex> {
        Some(CaseInsensitiveRegex::InlineFlag("REGEXP"))
    }

    fn date_part_sql(&self, part: DatePart, field: &str) -> Option<String> {
        let fmt = match part {
            DatePart::Year => "%Y",
            // strftime has no quarter format
            DatePart::Quarter => return None,
            DatePart::Month => "%m",
            DatePart::Day => "%d",
            DatePart::Week => "%W",
            DatePart::WeekDay => "%w",
            DatePart::Hour => "%H",
            DatePart::Minute => "%M",
            DatePart::Second => "%S",
            DatePart::Time => "%H:%M:%S",
            DatePart::Date => "%Y-%m-%d",
        };
        Some(helpers::strftime(fmt, field))
    }

    fn zero_pads_date_parts(&self) -> bool {
        true
    }

    fn supports_set_operation(&self, _op: SetOpType) -> bool {
        true
    }

    // Uses default supports_aggregate (basic functions only).
}
