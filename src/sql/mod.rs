//! SQL output layer: tokens, dialects and statement assembly.

pub mod dialect;
pub mod render;
pub mod token;

pub use dialect::{Dialect, SqlDialect};
pub use token::{Token, TokenStream};

/// Escapes a raw string into a complete SQL string literal.
///
/// The default implementation quotes and doubles embedded quotes. Callers
/// that hand rendering off to a driver with its own quoting rules can plug
/// in their own escaper.
pub trait Escaper {
    fn escape(&self, raw: &str) -> String;
}

/// Default escaper: single-quote the literal, doubling embedded quotes.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteEscaper;

impl Escaper for QuoteEscaper {
    fn escape(&self, raw: &str) -> String {
        format!("'{}'", raw.replace('\'', "''"))
    }
}

/// Everything serialization needs to know about the output engine.
///
/// Threaded explicitly through rendering so the same query value can be
/// rendered for several engines without any shared state.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub dialect: Dialect,
    pub escaper: &'a dyn Escaper,
}

impl<'a> RenderContext<'a> {
    pub fn new(dialect: Dialect, escaper: &'a dyn Escaper) -> Self {
        Self { dialect, escaper }
    }
}

impl RenderContext<'static> {
    pub fn mysql() -> Self {
        Self::new(Dialect::MySql, &QuoteEscaper)
    }

    pub fn postgres() -> Self {
        Self::new(Dialect::Postgres, &QuoteEscaper)
    }

    pub fn sqlite() -> Self {
        Self::new(Dialect::Sqlite, &QuoteEscaper)
    }
}
