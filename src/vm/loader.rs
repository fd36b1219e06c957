//! Program loader
//!
//! Verifies generated code before it can run and wraps it into a
//! [`CompiledExpression`]. Verification walks the instructions once,
//! simulating the operand stack:
//!
//! - operands (slots, function indices) are in range
//! - the stack never underflows and never exceeds `max_stack`
//! - every slot is bound before it is read
//! - the program ends with `ReturnValue` at depth 1, and nothing follows it

use super::bindings::Bindings;
use super::errors::{EvalError, VMError, VMResult};
use super::executor::{self, VMConfig};
use super::instructions::Instruction;
use crate::middle::{NativeFunction, Program};
use rayon::prelude::*;
use std::fmt::{self, Write as _};
use std::sync::Arc;
use tracing::debug;

/// Verified, immutable code shared by every clone of an artifact
#[derive(Debug)]
pub(crate) struct Code {
    pub(crate) name: String,
    pub(crate) slots: Vec<String>,
    pub(crate) functions: Vec<NativeFunction>,
    pub(crate) instructions: Box<[Instruction]>,
    pub(crate) max_stack: usize,
    pub(crate) config: VMConfig,
}

/// Load a program with the default VM configuration
pub fn load(program: Program) -> VMResult<CompiledExpression> {
    load_with_config(program, VMConfig::default())
}

/// Verify a program and turn it into an executable artifact
pub fn load_with_config(
    program: Program,
    config: VMConfig,
) -> VMResult<CompiledExpression> {
    verify(&program)?;
    debug!(
        expression = %program.name,
        instructions = program.instructions.len(),
        max_stack = program.max_stack,
        "program verified"
    );

    Ok(CompiledExpression {
        code: Arc::new(Code {
            name: program.name,
            slots: program.slots,
            functions: program.functions,
            instructions: program.instructions.into_boxed_slice(),
            max_stack: program.max_stack,
            config,
        }),
    })
}

fn verify(program: &Program) -> VMResult<()> {
    let slot_count = program.slot_count();
    let mut bound = vec![false; slot_count];
    let mut depth = 0usize;

    let last = match program.instructions.len() {
        0 => return Err(VMError::EmptyProgram),
        n => n - 1,
    };

    for (ip, instruction) in program.instructions.iter().enumerate() {
        match instruction {
            Instruction::BindLocal { slot, name } => {
                let expected = program.slots.get(*slot).ok_or(VMError::SlotOutOfRange {
                    ip,
                    slot: *slot,
                    count: slot_count,
                })?;
                if expected != name {
                    return Err(VMError::SlotNameMismatch {
                        slot: *slot,
                        expected: expected.clone(),
                        found: name.clone(),
                    });
                }
                bound[*slot] = true;
            }
            Instruction::LoadLocal(slot) => match bound.get(*slot) {
                None => {
                    return Err(VMError::SlotOutOfRange {
                        ip,
                        slot: *slot,
                        count: slot_count,
                    })
                }
                Some(false) => return Err(VMError::UnboundSlot { ip, slot: *slot }),
                Some(true) => {}
            },
            Instruction::CallStatic(index) if *index >= program.functions.len() => {
                return Err(VMError::FunctionOutOfRange {
                    ip,
                    index: *index,
                    count: program.functions.len(),
                });
            }
            Instruction::ReturnValue => {
                if depth != 1 {
                    return Err(VMError::UnbalancedReturn { ip, depth });
                }
                if ip != last {
                    return Err(VMError::UnreachableCode { ip: ip + 1 });
                }
            }
            _ => {}
        }

        let (pops, pushes) = match instruction {
            Instruction::CallIntrinsic(intrinsic) => (intrinsic.arity(), 1),
            other => other.opcode().stack_effect(),
        };
        depth = depth.checked_sub(pops).ok_or(VMError::StackUnderflow { ip })?;
        depth += pushes;
        if depth > program.max_stack {
            return Err(VMError::StackOverflow {
                ip,
                capacity: program.max_stack,
            });
        }
    }

    match program.instructions.last() {
        Some(Instruction::ReturnValue) => Ok(()),
        _ => Err(VMError::MissingReturn),
    }
}

/// A compiled, ready to run expression
///
/// Cloning is cheap and clones share the same code. Evaluation keeps all of
/// its state on the caller's side, so one artifact can be computed from many
/// threads at once.
#[derive(Clone)]
pub struct CompiledExpression {
    code: Arc<Code>,
}

impl CompiledExpression {
    /// Evaluate against one set of bindings
    ///
    /// # Example
    ///
    /// ```
    /// use suanshi::Compiler;
    ///
    /// let compiled = Compiler::with_stdlib()
    ///     .compile_source("circle", "PI * r ^ 2")
    ///     .unwrap();
    /// let area = compiled.compute(&[("r", 2.0)]).unwrap();
    /// assert!((area - 4.0 * std::f64::consts::PI).abs() < 1e-12);
    /// ```
    pub fn compute<B: Bindings + ?Sized>(
        &self,
        bindings: &B,
    ) -> Result<f64, EvalError> {
        executor::execute(&self.code, bindings)
    }

    /// Evaluate many binding sets in parallel; results keep the input order
    pub fn compute_batch<B: Bindings + Sync>(
        &self,
        rows: &[B],
    ) -> Vec<Result<f64, EvalError>> {
        rows.par_iter().map(|row| self.compute(row)).collect()
    }

    pub fn name(&self) -> &str {
        &self.code.name
    }

    /// Variables read from the bindings, in slot order
    pub fn variables(&self) -> &[String] {
        &self.code.slots
    }

    /// Names of the functions the code calls
    pub fn functions(&self) -> impl Iterator<Item = &str> {
        self.code.functions.iter().map(NativeFunction::name)
    }

    pub fn max_stack_depth(&self) -> usize {
        self.code.max_stack
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.code.instructions
    }

    /// Human readable listing of the code
    pub fn disassemble(&self) -> String {
        let code = &self.code;
        let mut out = String::new();
        let _ = writeln!(out, "expression {}", code.name);
        let _ = writeln!(out, "  max_stack: {}", code.max_stack);
        let _ = writeln!(out, "  slots: [{}]", code.slots.join(", "));
        let functions: Vec<&str> = self.functions().collect();
        let _ = writeln!(out, "  functions: [{}]", functions.join(", "));
        for (ip, instruction) in code.instructions.iter().enumerate() {
            let _ = writeln!(
                out,
                "  {:04}  {:#04x}  {}",
                ip,
                instruction.opcode() as u8,
                instruction
            );
        }
        out
    }
}

impl fmt::Debug for CompiledExpression {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.debug_struct("CompiledExpression")
            .field("name", &self.code.name)
            .field("variables", &self.code.slots)
            .field("max_stack", &self.code.max_stack)
            .field("instructions", &self.code.instructions.len())
            .finish()
    }
}
