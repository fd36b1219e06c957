//! Lexer module
//!
//! Splits expression source into tokens using longest-match rules over an
//! ordered set of token kinds. Lookahead of any depth is served lazily.

pub mod tokenizer;
pub mod tokens;
#[cfg(test)]
mod tests;

// Re-export types
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Tokenize a whole source string
///
/// Whitespace is dropped; the returned vector holds significant tokens only.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!(bytes = source.len(), "lexing source");

    let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(count = tokens.len(), "lexing complete");
    Ok(tokens)
}
