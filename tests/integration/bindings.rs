//! Variable bindings from the different supported containers

use indexmap::IndexMap;
use serde_json::json;
use std::collections::{BTreeMap, HashMap};
use suanshi::{Compiler, EvalError};

#[test]
fn test_variable_substitution() {
    let compiled = Compiler::new().compile_source("square", "x * x + 1").unwrap();
    assert_eq!(compiled.compute(&[("x", 3.0)]).unwrap(), 10.0);
    assert_eq!(compiled.variables(), &["x".to_string()]);
}

#[test]
fn test_every_container() {
    let compiled = Compiler::new().compile_source("sum", "a + b").unwrap();

    let owned: HashMap<String, f64> = HashMap::from([("a".into(), 1.0), ("b".into(), 2.0)]);
    let tree: BTreeMap<String, f64> = owned.clone().into_iter().collect();
    let index: IndexMap<String, f64> = owned.clone().into_iter().collect();
    let borrowed: HashMap<&str, f64> = HashMap::from([("a", 1.0), ("b", 2.0)]);
    let json = json!({ "a": 1, "b": 2.0 });

    assert_eq!(compiled.compute(&owned).unwrap(), 3.0);
    assert_eq!(compiled.compute(&tree).unwrap(), 3.0);
    assert_eq!(compiled.compute(&index).unwrap(), 3.0);
    assert_eq!(compiled.compute(&borrowed).unwrap(), 3.0);
    assert_eq!(compiled.compute(json.as_object().unwrap()).unwrap(), 3.0);
    assert_eq!(compiled.compute(&[("a", 1.0), ("b", 2.0)]).unwrap(), 3.0);
}

#[test]
fn test_missing_variable() {
    let compiled = Compiler::new().compile_source("square", "x * x + 1").unwrap();
    let err = compiled.compute(&HashMap::<String, f64>::new()).unwrap_err();
    assert_eq!(
        err,
        EvalError::MissingVariable {
            name: "x".to_string()
        }
    );
}

#[test]
fn test_non_numeric_json_binding() {
    let compiled = Compiler::new().compile_source("id", "x").unwrap();
    let bindings = json!({ "x": [1, 2] });
    let err = compiled.compute(bindings.as_object().unwrap()).unwrap_err();
    assert_eq!(
        err,
        EvalError::NotNumeric {
            name: "x".to_string(),
            found: "array".to_string()
        }
    );
}

#[test]
fn test_constant_shadows_binding() {
    let mut compiler = Compiler::new();
    compiler.register_constant("k", 2.0).unwrap();
    let compiled = compiler.compile_source("scaled", "k * x").unwrap();
    assert_eq!(compiled.variables(), &["x".to_string()]);
    assert_eq!(compiled.compute(&[("k", 100.0), ("x", 3.0)]).unwrap(), 6.0);
}

#[test]
fn test_artifact_clones_share_code() {
    let compiled = Compiler::new().compile_source("twice", "2 * y").unwrap();
    let clone = compiled.clone();
    assert_eq!(clone.name(), "twice");
    assert_eq!(clone.instructions(), compiled.instructions());
    assert_eq!(clone.compute(&[("y", 4.0)]).unwrap(), 8.0);
}
