//! Standard library
//!
//! Built-in functions and constants available to expressions.

pub mod math;
