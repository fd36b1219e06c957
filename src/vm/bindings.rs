//! Variable bindings
//!
//! `compute` reads each variable of an expression exactly once, by name, from
//! something implementing [`Bindings`].

use super::errors::EvalError;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Name to value lookup used by `compute`
pub trait Bindings {
    /// Numeric value bound to `name`
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError>;
}

fn missing(name: &str) -> EvalError {
    EvalError::MissingVariable {
        name: name.to_string(),
    }
}

impl<B: Bindings + ?Sized> Bindings for &B {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        (**self).lookup(name)
    }
}

impl<S: BuildHasher> Bindings for HashMap<String, f64, S> {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.get(name).copied().ok_or_else(|| missing(name))
    }
}

impl<S: BuildHasher> Bindings for HashMap<&str, f64, S> {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.get(name).copied().ok_or_else(|| missing(name))
    }
}

impl Bindings for BTreeMap<String, f64> {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.get(name).copied().ok_or_else(|| missing(name))
    }
}

impl<S: BuildHasher> Bindings for IndexMap<String, f64, S> {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.get(name).copied().ok_or_else(|| missing(name))
    }
}

/// Pairs are searched front to back; the first match wins
impl Bindings for [(&str, f64)] {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .ok_or_else(|| missing(name))
    }
}

impl<const N: usize> Bindings for [(&str, f64); N] {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        self.as_slice().lookup(name)
    }
}

/// JSON objects, as read from `--bindings` on the command line
impl Bindings for serde_json::Map<String, Value> {
    fn lookup(
        &self,
        name: &str,
    ) -> Result<f64, EvalError> {
        let value = self.get(name).ok_or_else(|| missing(name))?;
        value.as_f64().ok_or_else(|| EvalError::NotNumeric {
            name: name.to_string(),
            found: json_kind(value).to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
