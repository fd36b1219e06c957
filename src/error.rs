//! Crate-level error type
//!
//! Every stage has its own error enum; [`Error`] gathers them for callers
//! that run the whole pipeline.

use crate::frontend::lexer::LexError;
use crate::frontend::parser::ParseError;
use crate::middle::{CompileError, RegistryError};
use crate::util::config::ConfigError;
use crate::vm::EvalError;
use thiserror::Error;

/// Any error raised between reading source text and computing a value
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(LexError),

    #[error(transparent)]
    Parse(ParseError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<LexError> for Error {
    fn from(err: LexError) -> Self {
        Error::Lex(err)
    }
}

/// Lexical errors raised while parsing are reported as lexical errors
impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(lex) => Error::Lex(lex),
            other => Error::Parse(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_source;

    #[test]
    fn test_lex_error_is_lifted() {
        let err: Error = parse_source("1 + ?").unwrap_err().into();
        assert!(matches!(err, Error::Lex(LexError::UnmatchedInput { .. })));
    }

    #[test]
    fn test_parse_error_kept() {
        let err: Error = parse_source("1 +").unwrap_err().into();
        assert!(matches!(err, Error::Parse(ParseError::UnexpectedEof { .. })));
    }

    #[test]
    fn test_message_is_transparent() {
        let err: Error = CompileError::FunctionNotRegistered {
            name: "foo".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "Function foo is not known.");
    }
}
