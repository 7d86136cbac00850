//! Postgres SQL dialect.
//!
//! Postgres differences that matter here:
//! - ILIKE for case-insensitive pattern matching
//! - `~` / `~*` regex operators
//! - Full set-operation support (UNION/INTERSECT/EXCEPT)
//! - `EXTRACT(DOW ...)` for day-of-week (0 = Sunday)

use super::helpers;
use super::{CaseInsensitiveRegex, SqlDialect};
use crate::aggregation::AggFunc;
use crate::operation::date::DatePart;
use crate::set_ops::SetOpType;

/// Postgres SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct Postgres;

impl SqlDialect for Postgres {
    fn name(&self) -> &'static str {
        "postgres"
    }

    // Uses default format_bool (TRUE/FALSE literals).

    fn case_insensitive_like(&self) -> &'static str {
        "ILIKE"
    }

    fn regex_operator(&self) -> Option<&'static str> {
        Some("~")
    }

    fn case_insensitive_regex(&self) -> Option<CaseInsensitiveRegex> {
        Some(CaseInsensitiveRegex::Native("~*"))
    }

    fn date_part_sql(&self, part: DatePart, field: &str) -> Option<String> {
        Some(match part {
            DatePart::Year => helpers::extract_part("YEAR", field),
            DatePart::Quarter => helpers::extract_part("QUARTER", field),
            DatePart::Month => helpers::extract_part("MONTH", field),
            DatePart::Day => helpers::extract_part("DAY", field),
            DatePart::Week => helpers::extract_part("WEEK", field),
            DatePart::WeekDay => helpers::extract_part("DOW", field),
            DatePart::Hour => helpers::extract_part("HOUR", field),
            DatePart::Minute => helpers::extract_part("MINUTE", field),
            DatePart::Second => helpers::extract_part("SECOND", field),
            DatePart::Time => format!("date_trunc('second', {}::time)", field),
            DatePart::Date => format!("{}::date", field),
        })
    }

    fn supports_set_operation(&self, _op: SetOpType) -> bool {
        true
    }

    fn supports_aggregate(&self, _func: AggFunc) -> bool {
        true
    }

    fn supports_select_for_update(&self) -> bool {
        true
    }
}
