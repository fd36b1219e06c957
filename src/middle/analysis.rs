//! First pass over the tree
//!
//! Collects the runtime variables and referenced functions, and measures the
//! operand stack the generated code will need. Nothing is emitted here; a
//! failed analysis means code generation never starts.

use super::compiler::CompileError;
use super::registry::{ConstantTable, FunctionTable};
use crate::frontend::parser::ast::{BinOp, Expr, Visitor};
use indexmap::IndexSet;
use tracing::debug;

/// Facts gathered by the first pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Non-constant variable names, in order of first appearance
    pub variables: IndexSet<String>,
    /// Function names, in order of first appearance
    pub functions: IndexSet<String>,
    /// Deepest operand stack reached by a post-order evaluation
    pub max_stack_depth: usize,
}

struct FirstPass<'a> {
    constants: &'a ConstantTable,
    depth: usize,
    analysis: Analysis,
}

impl FirstPass<'_> {
    fn push(&mut self) {
        self.depth += 1;
        self.analysis.max_stack_depth = self.analysis.max_stack_depth.max(self.depth);
    }
}

impl Visitor for FirstPass<'_> {
    fn visit_number(
        &mut self,
        _value: f64,
    ) {
        self.push();
    }

    fn visit_variable(
        &mut self,
        name: &str,
    ) {
        if !self.constants.contains(name) {
            self.analysis.variables.insert(name.to_string());
        }
        self.push();
    }

    // A call pops its operand and pushes the result, so depth is unchanged
    fn enter_function(
        &mut self,
        name: &str,
    ) {
        self.analysis.functions.insert(name.to_string());
    }

    fn leave_binary(
        &mut self,
        _op: BinOp,
    ) {
        self.depth -= 1;
    }
}

/// Run the first pass, failing on the first function that is not registered
pub fn analyze(
    expr: &Expr,
    constants: &ConstantTable,
    functions: &FunctionTable,
) -> Result<Analysis, CompileError> {
    let mut pass = FirstPass {
        constants,
        depth: 0,
        analysis: Analysis::default(),
    };
    expr.accept(&mut pass);

    let analysis = pass.analysis;
    if let Some(name) = analysis.functions.iter().find(|name| !functions.contains(name)) {
        return Err(CompileError::FunctionNotRegistered { name: name.clone() });
    }

    debug!(
        variables = ?analysis.variables,
        functions = ?analysis.functions,
        max_stack_depth = analysis.max_stack_depth,
        "analysis complete"
    );
    Ok(analysis)
}
