//! Parser module
//!
//! Recursive-descent parser with one token of lookahead. Grammar, from lowest
//! to highest precedence:
//!
//! ```text
//! input   := addsub END
//! addsub  := muldiv (('+' | '-') muldiv)*      left-associative
//! muldiv  := exp (('*' | '/') exp)*            left-associative
//! exp     := atom ('^' exp)?                   right-associative
//! atom    := NUMBER | DECIMAL | IDENT | IDENT '(' addsub ')' | '(' addsub ')'
//! ```
//!
//! `+ - * /` chains are loops and may be arbitrarily long. Parentheses, call
//! operands and exponents recurse, and may nest at most [`MAX_NESTING_DEPTH`]
//! levels; deeper input fails with [`ParseError::NestingTooDeep`].

pub mod ast;
mod expr;
pub mod state;
#[cfg(test)]
mod tests;

pub use ast::*;
pub use state::{ParseError, ParserState};

use crate::frontend::lexer::Lexer;
use std::str::Chars;
use tracing::debug;

/// Deepest nesting of parentheses, call operands and exponents
pub const MAX_NESTING_DEPTH: usize = 256;

/// Expression parser
pub struct Parser<I>
where
    I: Iterator<Item = char>,
{
    state: ParserState<I>,
    depth: usize,
}

impl<'a> Parser<Chars<'a>> {
    /// Parser over a source string
    pub fn from_source(source: &'a str) -> Self {
        Self::new(Lexer::new(source))
    }
}

impl<I> Parser<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(lexer: Lexer<I>) -> Self {
        Self {
            state: ParserState::new(lexer),
            depth: 0,
        }
    }

    /// Parse one complete expression; the whole input must be consumed
    pub fn parse(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_add_sub()?;
        self.state.expect_end()?;
        debug!(nodes = expr.node_count(), "parsing complete");
        Ok(expr)
    }
}

/// Parse a source string into an expression tree
///
/// # Example
///
/// ```
/// use suanshi::frontend::parser::parse_source;
///
/// let expr = parse_source("(z*z + 8*y) / x").unwrap();
/// assert_eq!(expr.to_string(), "(((z * z) + (8.0 * y)) / x)");
/// ```
pub fn parse_source(source: &str) -> Result<Expr, ParseError> {
    debug!(bytes = source.len(), "parsing source");
    Parser::from_source(source).parse()
}
