//! Frontend
//!
//! Turns source text into an expression tree: the lexer produces tokens on
//! demand and the parser consumes them with one token of lookahead.

pub mod lexer;
pub mod parser;

pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::{parse_source, Expr, ParseError};
