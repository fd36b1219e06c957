//! Compiled code agrees with direct evaluation of the tree

use quickcheck::quickcheck;
use suanshi::frontend::parser::{BinOp, Expr};
use suanshi::vm::CompiledExpression;
use suanshi::Compiler;

/// Reference interpreter over the tree
fn interpret(
    expr: &Expr,
    x: f64,
) -> f64 {
    match expr {
        Expr::Number(value) => *value,
        Expr::Variable(_) => x,
        Expr::Function { operand, .. } => interpret(operand, x).sqrt(),
        Expr::Binary { op, left, right } => op.apply(interpret(left, x), interpret(right, x)),
    }
}

fn same(
    a: f64,
    b: f64,
) -> bool {
    a.to_bits() == b.to_bits() || (a.is_nan() && b.is_nan())
}

fn check(
    source: &str,
    x: f64,
) -> bool {
    let compiled = Compiler::with_stdlib().compile_source("q", source).unwrap();
    let tree = suanshi::parse_source(source).unwrap();
    same(compiled.compute(&[("x", x)]).unwrap(), interpret(&tree, x))
}

const SOURCES: &[&str] = &[
    "sin(x) * x ^ 2",
    "(x - PI) / (x + E) - sqrt(x * x)",
    "x ^ x ^ 0.5 + ln(x) * log(x)",
];

/// The same tree compiled twice by one compiler
fn compile_twice(source: &str) -> (CompiledExpression, CompiledExpression) {
    let compiler = Compiler::with_stdlib();
    let tree = suanshi::parse_source(source).unwrap();
    let first = compiler.compile("twice", &tree).unwrap();
    let second = compiler.compile("twice", &tree).unwrap();
    (first, second)
}

#[test]
fn test_compiling_twice_gives_identical_code() {
    for source in SOURCES {
        let (first, second) = compile_twice(source);
        assert_eq!(first.instructions(), second.instructions(), "{source}");
        assert_eq!(first.variables(), second.variables());
        assert_eq!(first.max_stack_depth(), second.max_stack_depth());
    }
}

quickcheck! {
    fn prop_binary_ops_match_rust(a: f64, b: f64) -> bool {
        let compiler = Compiler::new();
        [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Pow]
            .iter()
            .all(|op| {
                let source = format!("a {} b", op);
                let compiled = compiler.compile_source("op", &source).unwrap();
                let value = compiled.compute(&[("a", a), ("b", b)]).unwrap();
                same(value, op.apply(a, b))
            })
    }

    fn prop_mixed_expression_matches_interpreter(x: f64) -> bool {
        check("x * x + 3 * x - 2 / (x + 1)", x)
            && check("sqrt(x ^ 2) - x / 2 ^ 3", x)
            && check("(x - 1) * (x + 1) / 4", x)
    }

    fn prop_compute_is_idempotent(x: f64) -> bool {
        let compiled = Compiler::with_stdlib().compile_source("id", "sin(x) * x ^ 2").unwrap();
        let first = compiled.compute(&[("x", x)]).unwrap();
        let second = compiled.compute(&[("x", x)]).unwrap();
        same(first, second)
    }

    fn prop_compiling_twice_computes_identically(x: f64) -> bool {
        SOURCES.iter().all(|source| {
            let (first, second) = compile_twice(source);
            same(
                first.compute(&[("x", x)]).unwrap(),
                second.compute(&[("x", x)]).unwrap(),
            )
        })
    }
}
