//! Middle end: registries, analysis and code generation
//!
//! ```text
//! Expr ──analyze──▶ Analysis ──generate──▶ Program ──load──▶ CompiledExpression
//! ```

pub mod analysis;
pub mod codegen;
pub mod compiler;
pub mod registry;
#[cfg(test)]
mod tests;

pub use analysis::{analyze, Analysis};
pub use codegen::{generate, Program};
pub use compiler::{CompileError, Compiler};
pub use registry::{ConstantTable, FunctionTable, NativeFunction, RegistryError};
