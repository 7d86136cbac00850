//! Shared helper functions for SQL dialect implementations.
//!
//! Reusable building blocks that dialects compose to implement the
//! `SqlDialect` trait with minimal duplication.

// =============================================================================
// Boolean Formatting
// =============================================================================

/// Format boolean as literal TRUE/FALSE.
/// Used by: Postgres
pub fn format_bool_literal(b: bool) -> &'static str {
    if b {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Format boolean as numeric 1/0.
/// Used by: MySQL, SQLite
pub fn format_bool_numeric(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

// =============================================================================
// Date Part Extraction
// =============================================================================

/// `EXTRACT(PART FROM field)` - shared by MySQL and Postgres for most parts.
pub fn extract_part(part: &str, field: &str) -> String {
    format!("EXTRACT({} FROM {})", part, field)
}

/// `strftime('%fmt', field)` - SQLite's only date machinery.
pub fn strftime(fmt: &str, field: &str) -> String {
    format!("strftime('{}', {})", fmt, field)
}
