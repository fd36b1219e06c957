//! Parser tests module
//!
//! - basic: atoms, variables, calls
//! - precedence: operator precedence and associativity
//! - errors: malformed input
//! - boundary: deep nesting
//! - fuzz: generated expressions (proptest)

use super::*;
