//! Compiler facade
//!
//! Owns the registries and drives the pipeline: analysis, code generation,
//! then loading. Registries can only change through `&mut Compiler`, while
//! compiling takes `&self`, so a compile never observes a half-updated table.

use super::analysis::analyze;
use super::codegen::generate;
use super::registry::{ConstantTable, FunctionTable, RegistryError};
use crate::error::Error;
use crate::frontend::parser::{parse_source, Expr};
use crate::util::config::CompilerConfig;
use crate::vm::{loader, CompiledExpression, VMConfig, VMError};
use tracing::debug;

/// Compilation error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CompileError {
    /// The expression calls a function that was never registered
    #[error("Function {name} is not known.")]
    FunctionNotRegistered { name: String },

    /// Generated code was rejected by the loader; this is a compiler bug
    #[error("Generated code failed verification: {0}")]
    Instantiation(#[source] VMError),
}

/// Expression compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    constants: ConstantTable,
    functions: FunctionTable,
    vm_config: VMConfig,
}

impl Compiler {
    /// Compiler with empty registries
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiler preloaded with every standard function and constant
    pub fn with_stdlib() -> Self {
        let mut compiler = Self::new();
        crate::std::math::register_all(&mut compiler);
        compiler
    }

    /// Compiler set up from the `[compiler]` configuration section
    pub fn from_config(config: &CompilerConfig) -> Result<Self, RegistryError> {
        let mut compiler = Self::new();
        if config.stdlib {
            if config.functions.is_empty() {
                crate::std::math::register_all(&mut compiler);
            } else {
                crate::std::math::register_constants(&mut compiler);
                for name in &config.functions {
                    crate::std::math::register_function(&mut compiler, name)?;
                }
            }
        }
        for (name, value) in &config.constants {
            compiler.register_constant(name.as_str(), *value)?;
        }
        Ok(compiler)
    }

    /// Executor settings handed to every compiled expression
    pub fn with_vm_config(
        mut self,
        vm_config: VMConfig,
    ) -> Self {
        self.vm_config = vm_config;
        self
    }

    /// Register a constant; a later registration under the same name wins
    pub fn register_constant(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> Result<(), RegistryError> {
        self.constants.insert(name, value)
    }

    /// Register a unary function
    ///
    /// The function is called on a fixed probe set during registration and
    /// rejected if any probe gives two different results.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        func: fn(f64) -> f64,
    ) -> Result<(), RegistryError> {
        self.functions.register(name, func)
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub fn functions(&self) -> &FunctionTable {
        &self.functions
    }

    /// Compile an expression tree into an executable artifact
    pub fn compile(
        &self,
        name: &str,
        expr: &Expr,
    ) -> Result<CompiledExpression, CompileError> {
        debug!(expression = name, nodes = expr.node_count(), "compiling expression");

        let analysis = analyze(expr, &self.constants, &self.functions)?;
        let program = generate(name, expr, &analysis, &self.constants, &self.functions);

        loader::load_with_config(program, self.vm_config.clone())
            .map_err(CompileError::Instantiation)
    }

    /// Parse and compile source text
    pub fn compile_source(
        &self,
        name: &str,
        source: &str,
    ) -> Result<CompiledExpression, Error> {
        let expr = parse_source(source)?;
        Ok(self.compile(name, &expr)?)
    }
}
