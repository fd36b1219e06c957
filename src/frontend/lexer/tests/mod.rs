//! Lexer tests module
//!
//! - basic: token kinds, whitespace, spans
//! - munch: longest-match boundaries
//! - lookahead: `peek(n)` / `next_token()` agreement
//! - errors: unmatched trailing input

mod lookahead;
