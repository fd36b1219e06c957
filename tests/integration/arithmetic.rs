//! End-to-end arithmetic: source text in, number out

use suanshi::Compiler;

fn eval(source: &str) -> f64 {
    Compiler::with_stdlib()
        .compile_source("arith", source)
        .unwrap()
        .compute(&[] as &[(&str, f64)])
        .unwrap()
}

#[test]
fn test_precedence() {
    assert_eq!(eval("3 + 4 * 2"), 11.0);
    assert_eq!(eval("(3 + 4) * 2"), 14.0);
    assert_eq!(eval("2 + 3 * 4"), 14.0);
    assert_eq!(eval("2 * 3 ^ 2"), 18.0);
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(eval("2 ^ 2 ^ 3"), 256.0);
    assert_eq!(eval("(2 ^ 2) ^ 3"), 64.0);
}

#[test]
fn test_left_associative_operators() {
    assert_eq!(eval("10 - 3 - 2"), 5.0);
    assert_eq!(eval("100 / 10 / 5"), 2.0);
    assert_eq!(eval("8 / 2 * 4"), 16.0);
}

#[test]
fn test_decimal_literals() {
    assert_eq!(eval("0.5 + 0.25"), 0.75);
    assert_eq!(eval("3. * 2"), 6.0);
}

#[test]
fn test_whitespace_is_insignificant() {
    assert_eq!(eval(" 1\t+\n2 "), 3.0);
    assert_eq!(eval("1+2"), 3.0);
}

#[test]
fn test_constants() {
    let two_pi = eval("2 * PI");
    assert!((two_pi - 2.0 * std::f64::consts::PI).abs() < 1e-15);
    assert_eq!(eval("E"), std::f64::consts::E);
}

#[test]
fn test_evaluate_helper() {
    let value = suanshi::evaluate("x ^ 2 - 1", &[("x", 5.0)]).unwrap();
    assert_eq!(value, 24.0);
}
