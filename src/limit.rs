//! LIMIT/OFFSET pagination.
//!
//! Size and offset are unsigned, so the non-negativity rules hold by
//! construction.

use crate::sql::token::{Token, TokenStream};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit {
    pub size: u64,
    pub offset: u64,
}

impl Limit {
    pub fn new(size: u64, offset: u64) -> Self {
        Self { size, offset }
    }

    /// `LIMIT n OFFSET m`. The offset is always printed so the same limit
    /// renders the same bytes everywhere.
    pub fn to_tokens(&self) -> TokenStream {
        let mut ts = TokenStream::new();
        ts.push(Token::Limit)
            .space()
            .push(Token::LitInt(self.size as i64))
            .space()
            .push(Token::Offset)
            .space()
            .push(Token::LitInt(self.offset as i64));
        ts
    }
}
