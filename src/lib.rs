//! SuanShi (算式) expression compiler
//!
//! Compiles arithmetic expressions over named variables into verified
//! stack-machine code that can be evaluated many times, from many threads.
//!
//! ```text
//! source ──lexer──▶ tokens ──parser──▶ Expr ──compiler──▶ CompiledExpression
//! ```
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use suanshi::Compiler;
//!
//! let compiler = Compiler::with_stdlib();
//! let compiled = compiler.compile_source("hypot", "sqrt(x^2 + y^2)").unwrap();
//!
//! let bindings = HashMap::from([("x", 3.0), ("y", 4.0)]);
//! assert_eq!(compiled.compute(&bindings).unwrap(), 5.0);
//! ```

#![warn(rust_2018_idioms)]

// Public modules
pub mod error;
pub mod frontend;
pub mod middle;
pub mod std;
pub mod vm;

// Utility modules
pub mod util;

// Re-exports
pub use anyhow::{Context, Result};
pub use error::Error;
pub use frontend::parser::{parse_source, Expr};
pub use middle::{CompileError, Compiler, RegistryError};
pub use vm::{Bindings, CompiledExpression, EvalError};

use tracing::debug;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = "SuanShi (算式)";

/// Compile `source` with the standard library and evaluate it once
///
/// # Example
///
/// ```
/// use suanshi::{evaluate, Result};
///
/// fn main() -> Result<()> {
///     let value = evaluate("(z*z + 8*y) / x", &[("x", 2.0), ("y", 5.0), ("z", 3.0)])?;
///     assert_eq!(value, 24.5);
///     Ok(())
/// }
/// ```
pub fn evaluate<B: Bindings + ?Sized>(
    source: &str,
    bindings: &B,
) -> Result<f64> {
    debug!(source, "evaluate called");
    let compiled = Compiler::with_stdlib()
        .compile_source("eval", source)
        .with_context(|| format!("Failed to compile: {}", source))?;
    let value = compiled
        .compute(bindings)
        .with_context(|| format!("Failed to evaluate: {}", source))?;
    Ok(value)
}
