//! Errors surfaced through the whole pipeline

use suanshi::frontend::lexer::LexError;
use suanshi::frontend::parser::ParseError;
use suanshi::{Compiler, Error};

fn compile_err(source: &str) -> Error {
    Compiler::with_stdlib()
        .compile_source("err", source)
        .unwrap_err()
}

#[test]
fn test_unmatched_character_is_lex_error() {
    let err = compile_err("2 % 3");
    match err {
        Error::Lex(LexError::UnmatchedInput { text, position }) => {
            assert!(text.starts_with('%'));
            assert_eq!(position.column, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_errors() {
    assert!(matches!(
        compile_err("(1 + 2"),
        Error::Parse(ParseError::UnexpectedEof { .. })
    ));
    assert!(matches!(
        compile_err("(1 + 2 3"),
        Error::Parse(ParseError::ExpectedToken { .. })
    ));
    assert!(matches!(
        compile_err("1 + 2)"),
        Error::Parse(ParseError::TrailingInput { .. })
    ));
    assert!(matches!(
        compile_err("*"),
        Error::Parse(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn test_evaluate_wraps_with_context() {
    let err = suanshi::evaluate("x +", &[("x", 1.0)]).unwrap_err();
    assert!(format!("{:#}", err).starts_with("Failed to compile: x +"));

    let err = suanshi::evaluate("x + y", &[("x", 1.0)]).unwrap_err();
    assert!(format!("{:#}", err).contains("Missing binding for variable 'y'"));
}
