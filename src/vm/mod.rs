//! Virtual Machine and bytecode execution
//!
//! This module contains the instruction set, the loader that verifies
//! generated programs, and the stack-machine interpreter behind
//! [`CompiledExpression::compute`].

pub mod bindings;
pub mod errors;
pub mod executor;
pub mod instructions;
pub mod loader;
pub mod opcode;
#[cfg(test)]
mod tests;

pub use bindings::Bindings;
pub use errors::{EvalError, VMError, VMResult};
pub use executor::VMConfig;
pub use instructions::{Instruction, Intrinsic};
pub use loader::{load, load_with_config, CompiledExpression};
pub use opcode::Opcode;
