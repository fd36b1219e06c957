//! Function registration and dispatch

use suanshi::{CompileError, Compiler, Error, RegistryError};

fn cube(x: f64) -> f64 {
    x * x * x
}

#[test]
fn test_sqrt() {
    let compiled = Compiler::with_stdlib().compile_source("root", "sqrt(x)").unwrap();
    assert_eq!(compiled.compute(&[("x", 4.0)]).unwrap(), 2.0);
}

#[test]
fn test_standard_functions() {
    let compiler = Compiler::with_stdlib();
    let eval = |source: &str, x: f64| {
        compiler
            .compile_source("f", source)
            .unwrap()
            .compute(&[("x", x)])
            .unwrap()
    };
    assert!((eval("sin(x)", 0.5) - 0.5f64.sin()).abs() < 1e-15);
    assert!((eval("atan(x)", 1.0) - std::f64::consts::FRAC_PI_4).abs() < 1e-15);
    assert!((eval("ln(exp(x))", 3.0) - 3.0).abs() < 1e-12);
    assert_eq!(eval("log(x)", 1.0), 0.0);
    assert!(eval("sqrt(x)", -1.0).is_nan());
}

#[test]
fn test_custom_function() {
    let mut compiler = Compiler::new();
    compiler.register_function("cube", cube).unwrap();
    let compiled = compiler.compile_source("c", "cube(x + 1) - 1").unwrap();
    assert_eq!(compiled.compute(&[("x", 2.0)]).unwrap(), 26.0);
}

#[test]
fn test_unregistered_function_fails_compilation() {
    let err = Compiler::with_stdlib()
        .compile_source("bad", "gamma(x) + sqrt(x)")
        .unwrap_err();
    match err {
        Error::Compile(CompileError::FunctionNotRegistered { name }) => assert_eq!(name, "gamma"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_function_name_must_be_identifier() {
    let mut compiler = Compiler::new();
    let err = compiler.register_function("cube root", cube).unwrap_err();
    assert!(matches!(err, RegistryError::InvalidName { .. }));
}

#[test]
fn test_function_call_in_power_tower() {
    let compiled = Compiler::with_stdlib().compile_source("p", "sqrt(16) ^ 2 ^ 0.5").unwrap();
    let expected = 4f64.powf(2f64.powf(0.5));
    assert_eq!(compiled.compute(&[] as &[(&str, f64)]).unwrap(), expected);
}
