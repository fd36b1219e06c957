//! VM errors

use thiserror::Error;

/// VM result
pub type VMResult<T> = Result<T, VMError>;

/// Internal VM errors
///
/// The loader raises these when generated code breaks a structural rule.
/// Code that passed the loader never produces one at run time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VMError {
    #[error("Empty program")]
    EmptyProgram,

    #[error("Stack underflow at instruction {ip}")]
    StackUnderflow { ip: usize },

    #[error("Stack overflow at instruction {ip} (capacity {capacity})")]
    StackOverflow { ip: usize, capacity: usize },

    #[error("Slot {slot} out of range at instruction {ip} ({count} slots)")]
    SlotOutOfRange { ip: usize, slot: usize, count: usize },

    #[error("Slot {slot} read before it is bound at instruction {ip}")]
    UnboundSlot { ip: usize, slot: usize },

    #[error("Slot {slot} is bound to '{found}' but the slot table names '{expected}'")]
    SlotNameMismatch {
        slot: usize,
        expected: String,
        found: String,
    },

    #[error("Function index {index} out of range at instruction {ip} ({count} functions)")]
    FunctionOutOfRange { ip: usize, index: usize, count: usize },

    #[error("Return at instruction {ip} with stack depth {depth}, expected 1")]
    UnbalancedReturn { ip: usize, depth: usize },

    #[error("Instruction {ip} follows the return")]
    UnreachableCode { ip: usize },

    #[error("Program does not end with a return")]
    MissingReturn,
}

/// Evaluation error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// A variable of the expression has no binding
    #[error("Missing binding for variable '{name}'")]
    MissingVariable { name: String },

    /// A variable is bound to something that is not a number
    #[error("Binding for variable '{name}' is not numeric: {found}")]
    NotNumeric { name: String, found: String },

    #[error("Internal VM error: {0}")]
    Internal(#[from] VMError),
}
