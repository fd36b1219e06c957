//! 前瞻测试

use crate::frontend::lexer::{tokenize, Lexer, TokenKind};
use proptest::prelude::*;

#[cfg(test)]
mod lexer_lookahead_tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = Lexer::new("a + b");
        let first = lexer.peek(0).unwrap().cloned().unwrap();
        let again = lexer.peek(0).unwrap().cloned().unwrap();
        assert_eq!(first, again);
        assert_eq!(lexer.next_token().unwrap().unwrap(), first);
    }

    #[test]
    fn test_deep_peek_then_next() {
        let mut lexer = Lexer::new("x * (y - 2)");
        let third = lexer.peek(2).unwrap().cloned().unwrap();
        assert_eq!(third.kind, TokenKind::LParen);

        let consumed: Vec<_> = (0..3)
            .map(|_| lexer.next_token().unwrap().unwrap())
            .collect();
        assert_eq!(consumed[2], third);
        assert_eq!(consumed[0].text, "x");
        assert_eq!(consumed[1].kind, TokenKind::Star);
    }

    #[test]
    fn test_peek_past_end() {
        let mut lexer = Lexer::new("1 + 2");
        assert!(lexer.peek(3).unwrap().is_none());
        assert!(lexer.peek(10).unwrap().is_none());
        assert_eq!(lexer.next_token().unwrap().unwrap().text, "1");
        assert_eq!(lexer.next_token().unwrap().unwrap().text, "+");
        assert_eq!(lexer.next_token().unwrap().unwrap().text, "2");
        assert!(lexer.next_token().unwrap().is_none());
    }

    #[test]
    fn test_position_tracks_pending_tokens() {
        let mut lexer = Lexer::new("ab + c");
        lexer.peek(1).unwrap();
        assert_eq!(lexer.position().offset, 0);
        lexer.next_token().unwrap();
        assert_eq!(lexer.position().offset, 3);
    }

    fn atom_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z][a-zA-Z0-9_]{0,6}",
            "[0-9]{1,5}",
            "[0-9]{1,3}\\.[0-9]{0,3}",
            Just("+".to_string()),
            Just("-".to_string()),
            Just("*".to_string()),
            Just("/".to_string()),
            Just("^".to_string()),
            Just("(".to_string()),
            Just(")".to_string()),
        ]
    }

    fn source_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec((atom_strategy(), "[ \t\n]{1,3}"), 0..24).prop_map(|parts| {
            parts
                .into_iter()
                .map(|(atom, gap)| format!("{}{}", atom, gap))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_peek_then_next_agree(source in source_strategy(), pick in 0usize..32) {
            let reference = tokenize(&source).unwrap();
            let n = if reference.is_empty() { 0 } else { pick % reference.len() };

            let mut lexer = Lexer::new(&source);
            let peeked = lexer.peek(n).unwrap().cloned();
            prop_assert_eq!(peeked.as_ref(), reference.get(n));

            let mut consumed = Vec::new();
            for _ in 0..=n {
                if let Some(token) = lexer.next_token().unwrap() {
                    consumed.push(token);
                }
            }
            prop_assert_eq!(consumed.last(), peeked.as_ref());
            prop_assert_eq!(&consumed[..], &reference[..consumed.len()]);
        }
    }
}
