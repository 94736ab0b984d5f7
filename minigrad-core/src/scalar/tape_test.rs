use super::*;
use crate::autograd::Variable;
use crate::scalar::functions::{Add, Mul, Neg};

#[test]
fn test_leaf_and_constant_kinds() {
    let tape = Tape::new();
    let x = tape.leaf(2.0);
    let c = tape.constant(3.0);

    assert!(x.is_leaf());
    assert!(!x.is_constant());
    assert!(c.is_constant());
    assert!(!c.is_leaf());
    assert_eq!(x.value(), 2.0);
    assert_eq!(c.value(), 3.0);
    assert_eq!(tape.len(), 2);
    assert!(!tape.is_empty());
}

#[test]
fn test_ids_follow_arena_order() {
    let tape = Tape::new();
    let a = tape.leaf(1.0);
    let b = tape.constant(1.0);
    let c = a.add(&b).unwrap();
    assert_eq!(a.id().index(), 0);
    assert_eq!(b.id().index(), 1);
    assert_eq!(c.id().index(), 2);
}

#[test]
fn test_derived_node_records_inputs() {
    let tape = Tape::new();
    let x = tape.leaf(2.0);
    let y = tape.leaf(4.0);
    let z = x.mul(&y).unwrap();

    assert!(!z.is_leaf());
    assert!(!z.is_constant());
    assert_eq!(z.value(), 8.0);
    assert_eq!(tape.inputs(z.id()), vec![x.id(), y.id()]);
}

#[test]
fn test_operation_on_constants_is_constant() {
    let tape = Tape::new();
    let a = tape.constant(2.0);
    let b = tape.constant(5.0);
    let c = a.mul(&b).unwrap();
    assert!(c.is_constant());
    assert_eq!(c.value(), 10.0);
    assert!(c.parents().is_empty());
}

#[test]
fn test_grad_disabled_records_constants() {
    let tape = Tape::new();
    let x = tape.leaf(3.0);
    tape.set_grad_enabled(false);
    assert!(!tape.is_grad_enabled());

    let y = x.mul(&x).unwrap();
    assert!(y.is_constant());
    assert_eq!(y.value(), 9.0);

    tape.set_grad_enabled(true);
    let z = x.mul(&x).unwrap();
    assert!(!z.is_constant());
}

#[test]
fn test_chain_rule_skips_constant_inputs() {
    let tape = Tape::new();
    let x = tape.leaf(3.0);
    let c = tape.constant(4.0);
    let z = x.mul(&c).unwrap();

    let routed = tape.chain_rule(z.id(), 1.0).unwrap();
    assert_eq!(routed, vec![(x.id(), 4.0)]);
}

#[test]
fn test_chain_rule_of_leaf_is_empty() {
    let tape = Tape::new();
    let x = tape.leaf(3.0);
    assert!(tape.chain_rule(x.id(), 1.0).unwrap().is_empty());
}

#[test]
fn test_accumulate_derivative_adds() {
    let tape = Tape::new();
    let x = tape.leaf(1.0);
    assert_eq!(x.derivative(), None);
    tape.accumulate_derivative(x.id(), 1.5).unwrap();
    tape.accumulate_derivative(x.id(), 2.0).unwrap();
    assert_eq!(x.derivative(), Some(3.5));
    x.zero_grad();
    assert_eq!(x.derivative(), None);
}

#[test]
fn test_accumulate_derivative_on_non_leaf_fails() {
    let tape = Tape::new();
    let x = tape.leaf(1.0);
    let c = tape.constant(1.0);
    let y = x.neg().unwrap();

    assert_eq!(
        tape.accumulate_derivative(y.id(), 1.0),
        Err(MinigradError::NotALeaf { node: y.id() })
    );
    assert_eq!(
        c.accumulate_derivative(1.0),
        Err(MinigradError::NotALeaf { node: c.id() })
    );
}

#[test]
fn test_tape_mismatch() {
    let tape_a = Tape::new();
    let tape_b = Tape::new();
    let x = tape_a.leaf(1.0);
    let y = tape_b.leaf(2.0);
    assert!(matches!(x.add(&y), Err(MinigradError::TapeMismatch { .. })));
    assert!(!tape_a.same_tape(&tape_b));
    assert!(tape_a.same_tape(&x.tape().clone()));
}

#[test]
fn test_arity_mismatch() {
    let tape = Tape::new();
    let x = tape.leaf(1.0);
    let result = tape.apply(Box::new(Add), &[&x]);
    assert_eq!(
        result.unwrap_err(),
        MinigradError::ArityMismatch {
            function: "add".to_string(),
            expected: 2,
            actual: 1,
        }
    );
    assert!(tape.apply(Box::new(Neg), &[&x, &x]).is_err());
    assert!(tape.apply(Box::new(Mul), &[&x, &x]).is_ok());
}
