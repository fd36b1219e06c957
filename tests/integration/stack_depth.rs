//! Deeply nested expressions: the computed stack depth must always suffice

use proptest::prelude::*;
use suanshi::Compiler;

/// `1 op (1 op (1 op ...))`, nested to the right
fn right_nested(
    depth: usize,
    op: char,
) -> String {
    let mut source = String::from("1");
    for _ in 0..depth {
        source = format!("1 {} ({})", op, source);
    }
    source
}

#[test]
fn test_fifty_right_nested_additions() {
    let compiled = Compiler::new()
        .compile_source("deep", &right_nested(50, '+'))
        .unwrap();
    assert_eq!(compiled.max_stack_depth(), 51);
    assert_eq!(compiled.compute(&[] as &[(&str, f64)]).unwrap(), 51.0);
}

#[test]
fn test_long_left_chain_needs_two_slots() {
    let source = vec!["x"; 500].join(" * ");
    let compiled = Compiler::new().compile_source("chain", &source).unwrap();
    assert_eq!(compiled.max_stack_depth(), 2);
    assert_eq!(compiled.compute(&[("x", 1.0)]).unwrap(), 1.0);
}

#[test]
fn test_hundred_thousand_term_flat_sum() {
    let source = vec!["1"; 100_000].join("+");
    let compiled = Compiler::new().compile_source("flat", &source).unwrap();
    assert_eq!(compiled.max_stack_depth(), 2);
    assert_eq!(compiled.instructions().len(), 200_000);
    assert_eq!(compiled.compute(&[] as &[(&str, f64)]).unwrap(), 100_000.0);
}

#[test]
fn test_flat_chain_of_mixed_operators() {
    let source = vec!["x * 2 - x"; 50_000].join(" + ");
    let compiled = Compiler::new().compile_source("mixed", &source).unwrap();
    assert_eq!(compiled.max_stack_depth(), 3);
    assert_eq!(compiled.compute(&[("x", 3.0)]).unwrap(), 150_000.0);
}

proptest! {
    #[test]
    fn prop_nested_sums_evaluate(depth in 1usize..120) {
        let compiled = Compiler::new()
            .compile_source("deep", &right_nested(depth, '+'))
            .unwrap();
        prop_assert_eq!(compiled.max_stack_depth(), depth + 1);
        prop_assert_eq!(
            compiled.compute(&[] as &[(&str, f64)]).unwrap(),
            (depth + 1) as f64
        );
    }

    #[test]
    fn prop_nested_parens_and_powers(depth in 1usize..60) {
        let source = format!("{}x{}", "(x ^ ".repeat(depth), ")".repeat(depth));
        let compiled = Compiler::new().compile_source("tower", &source).unwrap();
        prop_assert!(compiled.compute(&[("x", 1.0)]).is_ok());
        prop_assert_eq!(compiled.compute(&[("x", 1.0)]).unwrap(), 1.0);
    }
}
