//! SQL dialect abstraction.
//!
//! Each supported engine implements [`SqlDialect`]; the [`Dialect`] enum
//! wraps them behind a `Copy` value that rendering threads around. Feature
//! gates (regex operators, set operations, row locking, statistical
//! aggregates) live here so rendering can fail fast with a precise error
//! instead of emitting SQL the engine will reject.

pub mod helpers;
mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySql;
pub use postgres::Postgres;
pub use sqlite::Sqlite;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::aggregation::AggFunc;
use crate::operation::date::DatePart;
use crate::set_ops::SetOpType;

/// How an engine spells a case-insensitive regex match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseInsensitiveRegex {
    /// Dedicated operator (Postgres `~*`).
    Native(&'static str),
    /// Lowercase both sides around the given operator (MySQL).
    LowerBothSides(&'static str),
    /// Prefix the pattern with an inline `(?i)` flag (SQLite).
    InlineFlag(&'static str),
}

/// Engine-specific spellings and capability gates.
pub trait SqlDialect: fmt::Debug {
    fn name(&self) -> &'static str;

    fn format_bool(&self, b: bool) -> &'static str {
        helpers::format_bool_literal(b)
    }

    /// Keyword for case-insensitive pattern lookups (`ILIKE` on Postgres,
    /// plain `LIKE` on engines whose default collation already folds case).
    fn case_insensitive_like(&self) -> &'static str {
        "LIKE"
    }

    /// Whether LIKE needs an explicit `ESCAPE '\'` clause for backslash
    /// escaped wildcards.
    fn like_requires_escape_clause(&self) -> bool {
        false
    }

    /// Case-sensitive regex operator, if the engine has one.
    fn regex_operator(&self) -> Option<&'static str> {
        None
    }

    fn case_insensitive_regex(&self) -> Option<CaseInsensitiveRegex> {
        None
    }

    /// SQL expression extracting a date part from a field reference, or
    /// `None` when the engine cannot express the part.
    fn date_part_sql(&self, part: DatePart, field: &str) -> Option<String>;

    /// Whether date-part comparands must be rendered as zero-padded strings
    /// (strftime output compares textually).
    fn zero_pads_date_parts(&self) -> bool {
        false
    }

    fn supports_set_operation(&self, op: SetOpType) -> bool;

    fn supports_aggregate(&self, func: AggFunc) -> bool {
        func.is_basic()
    }

    fn supports_select_for_update(&self) -> bool {
        false
    }
}

/// Placeholder engine with no capabilities. Every gated feature fails on
/// it, which is what a schema wired to an unrecognized driver should do.
#[derive(Debug, Clone, Copy)]
pub struct Unsupported;

impl SqlDialect for Unsupported {
    fn name(&self) -> &'static str {
        "unsupported"
    }

    fn date_part_sql(&self, _part: DatePart, _field: &str) -> Option<String> {
        None
    }

    fn supports_set_operation(&self, _op: SetOpType) -> bool {
        false
    }

    fn supports_aggregate(&self, _func: AggFunc) -> bool {
        false
    }
}

/// The supported output engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    MySql,
    #[default]
    Postgres,
    Sqlite,
    Unsupported,
}

impl Dialect {
    /// Get the dialect implementation for this variant.
    pub fn dialect(&self) -> &'static dyn SqlDialect {
        match self {
            Dialect::MySql => &MySql,
            Dialect::Postgres => &Postgres,
            Dialect::Sqlite => &Sqlite,
            Dialect::Unsupported => &Unsupported,
        }
    }

    /// Map a database driver name to a dialect. Unrecognized drivers get
    /// [`Dialect::Unsupported`], so every gated feature fails on them.
    pub fn from_engine(name: &str) -> Self {
        match name {
            "mysql" | "mysql2" => Dialect::MySql,
            "postgres" | "postgresql" => Dialect::Postgres,
            "sqlite" | "sqlite3" => Dialect::Sqlite,
            _ => Dialect::Unsupported,
        }
    }
}

impl SqlDialect for Dialect {
    fn name(&self) -> &'static str {
        self.dialect().name()
    }

    fn format_bool(&self, b: bool) -> &'static str {
        self.dialect().format_bool(b)
    }

    fn case_insensitive_like(&self) -> &'static str {
        self.dialect().case_insensitive_like()
    }

    fn like_requires_escape_clause(&self) -> bool {
        self.dialect().like_requires_escape_clause()
    }

    fn regex_operator(&self) -> Option<&'static str> {
        self.dialect().regex_operator()
    }

    fn case_insensitive_regex(&self) -> Option<CaseInsensitiveRegex> {
        self.dialect().case_insensitive_regex()
    }

    fn date_part_sql(&self, part: DatePart, field: &str) -> Option<String> {
        self.dialect().date_part_sql(part, field)
    }

    fn zero_pads_date_parts(&self) -> bool {
        self.dialect().zero_pads_date_parts()
    }

    fn supports_set_operation(&self, op: SetOpType) -> bool {
        self.dialect().supports_set_operation(op)
    }

    fn supports_aggregate(&self, func: AggFunc) -> bool {
        self.dialect().supports_aggregate(func)
    }

    fn supports_select_for_update(&self) -> bool {
        self.dialect().supports_select_for_update()
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
