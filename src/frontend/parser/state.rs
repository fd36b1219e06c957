//! Parser state and error handling

use crate::frontend::lexer::{LexError, Lexer, Token, TokenKind};
use crate::util::span::{Position, Span};
use thiserror::Error;

/// Parse error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Expected a specific token
    #[error("Expected {expected}, found {found} '{text}' at {span}")]
    ExpectedToken {
        expected: TokenKind,
        found: TokenKind,
        text: String,
        span: Span,
    },
    /// Token that cannot start or continue an expression here
    #[error("Unexpected token {found} '{text}' at {span}")]
    UnexpectedToken {
        found: TokenKind,
        text: String,
        span: Span,
    },
    /// Input ended where a token was required
    #[error("Unexpected end of input at {position}, expected {expected}")]
    UnexpectedEof {
        expected: &'static str,
        position: Position,
    },
    /// A complete expression was followed by more tokens
    #[error("Unexpected trailing {found} '{text}' at {span}")]
    TrailingInput {
        found: TokenKind,
        text: String,
        span: Span,
    },
    /// Parentheses, calls or exponents nested past the parser limit
    #[error("Expression nested deeper than {limit} levels at {span}")]
    NestingTooDeep { limit: usize, span: Span },
    /// Numeric literal that does not fit an f64
    #[error("Invalid number literal '{text}' at {span}")]
    InvalidNumber { text: String, span: Span },
    /// Lexical error raised while pulling tokens
    #[error(transparent)]
    Lex(#[from] LexError),
}

impl ParseError {
    pub(crate) fn unexpected(token: Token) -> Self {
        ParseError::UnexpectedToken {
            found: token.kind,
            text: token.text,
            span: token.span,
        }
    }
}

/// Parser state: a token cursor with one-token lookahead over a lexer
pub struct ParserState<I>
where
    I: Iterator<Item = char>,
{
    lexer: Lexer<I>,
}

impl<I> ParserState<I>
where
    I: Iterator<Item = char>,
{
    pub fn new(lexer: Lexer<I>) -> Self {
        Self { lexer }
    }

    /// Kind of the next token, if any
    pub fn peek_kind(&mut self) -> Result<Option<TokenKind>, ParseError> {
        Ok(self.lexer.peek(0)?.map(|t| t.kind))
    }

    /// Whether the next token has the given kind
    pub fn at(
        &mut self,
        kind: TokenKind,
    ) -> Result<bool, ParseError> {
        Ok(self.peek_kind()? == Some(kind))
    }

    /// Consume the next token, if any
    pub fn bump(&mut self) -> Result<Option<Token>, ParseError> {
        Ok(self.lexer.next_token()?)
    }

    /// Consume the next token, failing at end of input
    pub fn bump_required(
        &mut self,
        expected: &'static str,
    ) -> Result<Token, ParseError> {
        match self.lexer.next_token()? {
            Some(token) => Ok(token),
            None => Err(ParseError::UnexpectedEof {
                expected,
                position: self.lexer.position(),
            }),
        }
    }

    /// Consume a token of the given kind or fail
    ///
    /// A different token is `ExpectedToken`; end of input is `UnexpectedEof`
    /// naming the wanted token.
    pub fn expect(
        &mut self,
        kind: TokenKind,
    ) -> Result<Token, ParseError> {
        let token = self.bump_required(kind.describe())?;
        if token.kind == kind {
            Ok(token)
        } else {
            Err(ParseError::ExpectedToken {
                expected: kind,
                found: token.kind,
                text: token.text,
                span: token.span,
            })
        }
    }

    /// Fail unless the input is exhausted
    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        match self.bump()? {
            None => Ok(()),
            Some(token) => Err(ParseError::TrailingInput {
                found: token.kind,
                text: token.text,
                span: token.span,
            }),
        }
    }
}
