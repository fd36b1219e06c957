//! Constant and function registries
//!
//! Both tables are owned by a [`Compiler`](super::Compiler) and filled before
//! anything is compiled. Constants are folded into the generated code;
//! functions are called through plain `fn(f64) -> f64` pointers, so a
//! registered function cannot carry instance state.

use crate::frontend::lexer::TokenKind;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// Inputs every function is evaluated on twice during registration
const PURITY_PROBES: [f64; 9] = [0.0, 0.5, 1.0, -1.0, 2.0, -2.5, 3.75, 10.0, 1e-3];

/// Registration error
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    /// Name cannot be written as an identifier in source text
    #[error("'{name}' is not a valid identifier")]
    InvalidName { name: String },

    /// Function gave two different results for the same input
    #[error("Function {name} is not deterministic: f({input}) returned {first} and then {second}")]
    Impure {
        name: String,
        input: f64,
        first: f64,
        second: f64,
    },

    /// Configuration named a function the standard library does not provide
    #[error("Function {name} is not part of the standard library")]
    UnknownStdFunction { name: String },
}

/// Whether `name` lexes as exactly one identifier token
pub fn is_valid_identifier(name: &str) -> bool {
    TokenKind::classify(name) == Some(TokenKind::Identifier)
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    if is_valid_identifier(name) {
        Ok(())
    } else {
        Err(RegistryError::InvalidName {
            name: name.to_string(),
        })
    }
}

/// Named constants, in registration order
#[derive(Debug, Clone, Default)]
pub struct ConstantTable {
    constants: IndexMap<String, f64>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constant, replacing any previous value under the same name
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        check_name(&name)?;
        debug!(%name, value, "registering constant");
        self.constants.insert(name, value);
        Ok(())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<f64> {
        self.constants.get(name).copied()
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.constants.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.constants.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.constants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constants.is_empty()
    }
}

/// A registered unary function
#[derive(Debug, Clone)]
pub struct NativeFunction {
    name: String,
    func: fn(f64) -> f64,
}

impl NativeFunction {
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn call(
        &self,
        operand: f64,
    ) -> f64 {
        (self.func)(operand)
    }

    /// Probe the function for observable non-determinism
    fn check_purity(&self) -> Result<(), RegistryError> {
        for input in PURITY_PROBES {
            let first = self.call(input);
            let second = self.call(input);
            // Compare bit patterns so that NaN == NaN
            if first.to_bits() != second.to_bits() {
                return Err(RegistryError::Impure {
                    name: self.name.clone(),
                    input,
                    first,
                    second,
                });
            }
        }
        Ok(())
    }
}

/// Registered functions, in registration order
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: IndexMap<String, NativeFunction>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a function, replacing any previous one under the same name
    pub fn register(
        &mut self,
        name: impl Into<String>,
        func: fn(f64) -> f64,
    ) -> Result<(), RegistryError> {
        let name = name.into();
        check_name(&name)?;
        let function = NativeFunction {
            name: name.clone(),
            func,
        };
        function.check_purity()?;
        debug!(%name, "registering function");
        self.functions.insert(name, function);
        Ok(())
    }

    pub fn get(
        &self,
        name: &str,
    ) -> Option<&NativeFunction> {
        self.functions.get(name)
    }

    pub fn contains(
        &self,
        name: &str,
    ) -> bool {
        self.functions.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
