//! Token types

use crate::util::span::{Position, Span};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Lexer error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unmatched input '{text}' at {position}")]
    UnmatchedInput { text: String, position: Position },
}

/// Token kind
///
/// The declaration order is the rule order: when several rules match the same
/// text, the one declared last wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    DecimalNumber,

    // Identifiers
    Identifier,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,

    // Delimiters
    LParen,
    RParen,

    // Trivia
    Whitespace,
}

/// Compiled matching rules, indexed by `TokenKind as usize`
static RULES: Lazy<Vec<Regex>> = Lazy::new(|| {
    TokenKind::ALL
        .iter()
        .map(|kind| {
            Regex::new(&format!(r"\A(?:{})\z", kind.pattern()))
                .expect("token rules are valid regular expressions")
        })
        .collect()
});

impl TokenKind {
    /// Every kind, in rule order
    pub const ALL: [TokenKind; 11] = [
        TokenKind::Number,
        TokenKind::DecimalNumber,
        TokenKind::Identifier,
        TokenKind::Plus,
        TokenKind::Minus,
        TokenKind::Star,
        TokenKind::Slash,
        TokenKind::Caret,
        TokenKind::LParen,
        TokenKind::RParen,
        TokenKind::Whitespace,
    ];

    /// Regular expression source of the matching rule
    pub fn pattern(self) -> &'static str {
        match self {
            TokenKind::Number => r"[0-9]+",
            TokenKind::DecimalNumber => r"[0-9]+\.[0-9]*",
            TokenKind::Identifier => r"[A-Za-z]+[A-Za-z0-9_]*",
            TokenKind::Plus => r"\+",
            TokenKind::Minus => r"-",
            TokenKind::Star => r"\*",
            TokenKind::Slash => r"/",
            TokenKind::Caret => r"\^",
            TokenKind::LParen => r"\(",
            TokenKind::RParen => r"\)",
            TokenKind::Whitespace => r"[ \t\r\n]+",
        }
    }

    /// Whether the rule matches the whole of `text`
    #[inline]
    pub fn matches(
        self,
        text: &str,
    ) -> bool {
        RULES[self as usize].is_match(text)
    }

    /// Kind of the last rule matching the whole of `text`
    pub fn classify(text: &str) -> Option<TokenKind> {
        TokenKind::ALL
            .iter()
            .copied()
            .filter(|kind| kind.matches(text))
            .last()
    }

    /// Tokens that are recognized but never handed to the parser
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, TokenKind::Whitespace)
    }

    /// Human readable description used in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Number => "number",
            TokenKind::DecimalNumber => "decimal number",
            TokenKind::Identifier => "identifier",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Caret => "'^'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Whitespace => "whitespace",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    /// Create a new token
    pub fn new(
        kind: TokenKind,
        text: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:?} '{}' {}", self.kind, self.text, self.span)
    }
}
