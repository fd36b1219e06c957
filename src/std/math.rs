//! Standard Math library
//!
//! Unary functions and constants registered by `Compiler::with_stdlib`.

use crate::middle::{Compiler, RegistryError};
use tracing::debug;

/// Square root
pub fn sqrt(n: f64) -> f64 {
    n.sqrt()
}

/// Sine
pub fn sin(n: f64) -> f64 {
    n.sin()
}

/// Cosine
pub fn cos(n: f64) -> f64 {
    n.cos()
}

/// Tangent
pub fn tan(n: f64) -> f64 {
    n.tan()
}

/// Arc sine
pub fn asin(n: f64) -> f64 {
    n.asin()
}

/// Arc cosine
pub fn acos(n: f64) -> f64 {
    n.acos()
}

/// Arc tangent
pub fn atan(n: f64) -> f64 {
    n.atan()
}

/// e^n
pub fn exp(n: f64) -> f64 {
    n.exp()
}

/// Natural logarithm
pub fn ln(n: f64) -> f64 {
    n.ln()
}

/// Pi constant
pub const PI: f64 = std::f64::consts::PI;

/// Euler's number
pub const E: f64 = std::f64::consts::E;

/// Standard functions by source name; `log` is an alias of `ln`
pub const FUNCTIONS: &[(&str, fn(f64) -> f64)] = &[
    ("sqrt", sqrt),
    ("sin", sin),
    ("cos", cos),
    ("tan", tan),
    ("asin", asin),
    ("acos", acos),
    ("atan", atan),
    ("exp", exp),
    ("log", ln),
    ("ln", ln),
];

/// Standard constants by source name
pub const CONSTANTS: &[(&str, f64)] = &[("PI", PI), ("E", E)];

/// Look up a standard function
pub fn function(name: &str) -> Option<fn(f64) -> f64> {
    FUNCTIONS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, func)| *func)
}

/// Register every standard constant
pub fn register_constants(compiler: &mut Compiler) {
    for (name, value) in CONSTANTS {
        // Names in CONSTANTS are valid identifiers
        let _ = compiler.register_constant(*name, *value);
    }
}

/// Register one standard function by name
pub fn register_function(
    compiler: &mut Compiler,
    name: &str,
) -> Result<(), RegistryError> {
    let func = function(name).ok_or_else(|| RegistryError::UnknownStdFunction {
        name: name.to_string(),
    })?;
    compiler.register_function(name, func)
}

/// Register every standard function and constant
pub fn register_all(compiler: &mut Compiler) {
    register_constants(compiler);
    for (name, func) in FUNCTIONS {
        // Names in FUNCTIONS are valid identifiers and every entry is pure
        let _ = compiler.register_function(*name, *func);
    }
    debug!(
        functions = FUNCTIONS.len(),
        constants = CONSTANTS.len(),
        "standard library registered"
    );
}
