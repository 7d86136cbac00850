//! MySQL SQL dialect.
//!
//! MySQL differences that matter here:
//! - Boolean is TINYINT(1), renders as 1/0
//! - `REGEXP` is case-insensitive under the default collation; `REGEXP
//!   BINARY` forces case sensitivity, and the insensitive form lowercases
//!   both sides
//! - Only UNION among the set operations (pre-8.0.31 servers)
//! - `DAYOFWEEK()` instead of `EXTRACT(DOW ...)`

use super::helpers;
use super::{CaseInsensitiveRegex, SqlDialect};
use crate::aggregation::AggFunc;
use crate::operation::date::DatePart;
use crate::set_ops::SetOpType;

/// MySQL SQL dialect.
#[derive(Debug, Clone, Copy)]
pub struct MySql;

impl SqlDialect for MySql {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_numeric(b)
    }

    // Default LIKE is already case-insensitive under *_ci collations.

    fn regex_operator(&self) -> Option<&'static str> {
        Some("REGEXP BINARY")
    }

    fn case_insensitive_regex(&self) -> Option<CaseInsensitiveRegex> {
        Some(CaseInsensitiveRegex::LowerBothSides("REGEXP"))
    }

    fn date_part_sql(&self, part: DatePart, field: &str) -> Option<String> {
        Some(match part {
            DatePart::Year => helpers::extract_part("YEAR", field),
            DatePart::Quarter => helpers::extract_part("QUARTER", field),
            DatePart::Month => helpers::extract_part("MONTH", field),
            DatePart::Day => helpers::extract_part("DAY", field),
            DatePart::Week => helpers::extract_part("WEEK", field),
            DatePart::WeekDay => format!("DAYOFWEEK({})", field),
            DatePart::Hour => helpers::extract_part("HOUR", field),
            DatePart::Minute => helpers::extract_part("MINUTE", field),
            DatePart::Second => helpers::extract_part("SECOND", field),
            DatePart::Time => format!("DATE_FORMAT({}, '%H:%i:%s')", field),
            DatePart::Date => format!("DATE({})", field),
        })
    }

    fn supports_set_operation(&self, op: SetOpType) -> bool {
        matches!(op, SetOpType::Union)
    }

    fn supports_aggregate(&self, _func: AggFunc) -> bool {
        true
    }

    fn supports_select_for_update(&self) -> bool {
        true
    }
}
