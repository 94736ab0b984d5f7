//! # Scalar computation graphs
//!
//! Concrete differentiable values driving the autograd engine.
//!
//! - [`Tape`]: arena that owns the nodes and mints their ids.
//! - [`Scalar`]: handle onto one node; implements [`Variable`].
//! - [`functions`]: the differentiable operations ([`ScalarFunction`] impls).
//! - [`operators`]: the plain `f64` kernels those operations are built from.
//!
//! ```
//! use minigrad_core::scalar::Tape;
//!
//! let tape = Tape::new();
//! let x = tape.leaf(3.0);
//! let y = tape.leaf(5.0);
//! let out = x.add(&x)?.mul(&y)?;
//! out.backward()?;
//! assert_eq!(x.derivative(), Some(10.0));
//! assert_eq!(y.derivative(), Some(6.0));
//! # Ok::<(), minigrad_core::MinigradError>(())
//! ```

pub mod functions;
pub mod operators;
pub mod tape;

pub use functions::ScalarFunction;
pub use tape::Tape;

use crate::autograd::{backpropagate, NodeId, Variable};
use crate::error::MinigradError;
use functions::{Add, Equal, Exp, Inv, LessThan, Log, Mul, Neg, Relu, Sigmoid};

/// A scalar value recorded on a [`Tape`].
///
/// Cloning a `Scalar` clones the handle, not the node.
#[derive(Debug, Clone)]
pub struct Scalar {
    tape: Tape,
    id: NodeId,
}

impl Scalar {
    pub(crate) fn from_parts(tape: Tape, id: NodeId) -> Self {
        Scalar { tape, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tape(&self) -> &Tape {
        &self.tape
    }

    /// The forward value.
    pub fn value(&self) -> f64 {
        self.tape.value(self.id)
    }

    /// Accumulated derivative of a leaf, `None` before any backward pass
    /// reached it (and always `None` for non-leaves).
    pub fn derivative(&self) -> Option<f64> {
        self.tape.derivative(self.id)
    }

    /// Clears the accumulated derivative of a leaf.
    pub fn zero_grad(&self) {
        self.tape.zero_grad(self.id);
    }

    /// Backpropagates from this node with a seed derivative of 1.0.
    pub fn backward(&self) -> Result<(), MinigradError> {
        self.backward_with(1.0)
    }

    /// Backpropagates from this node with the given seed derivative.
    pub fn backward_with(&self, d_output: f64) -> Result<(), MinigradError> {
        backpropagate(self, d_output)
    }

    pub fn add(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Add), &[self, other])
    }

    pub fn sub(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.add(&other.neg()?)
    }

    pub fn mul(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Mul), &[self, other])
    }

    pub fn div(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.mul(&other.inv()?)
    }

    pub fn neg(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Neg), &[self])
    }

    pub fn inv(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Inv), &[self])
    }

    pub fn lt(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(LessThan), &[self, other])
    }

    pub fn gt(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        other.lt(self)
    }

    pub fn eq(&self, other: &Scalar) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Equal), &[self, other])
    }

    pub fn log(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Log), &[self])
    }

    pub fn exp(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Exp), &[self])
    }

    pub fn sigmoid(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Sigmoid), &[self])
    }

    pub fn relu(&self) -> Result<Scalar, MinigradError> {
        self.tape.apply(Box::new(Relu), &[self])
    }
}

impl Variable for Scalar {
    type Derivative = f64;

    fn unique_id(&self) -> NodeId {
        self.id
    }

    fn is_leaf(&self) -> bool {
        self.tape.is_leaf(self.id)
    }

    fn is_constant(&self) -> bool {
        self.tape.is_constant(self.id)
    }

    fn parents(&self) -> Vec<Self> {
        self.tape
            .inputs(self.id)
            .into_iter()
            .map(|id| Scalar::from_parts(self.tape.clone(), id))
            .collect()
    }

    fn accumulate_derivative(&self, derivative: f64) -> Result<(), MinigradError> {
        self.tape.accumulate_derivative(self.id, derivative)
    }

    fn chain_rule(&self, d_output: &f64) -> Result<Vec<(Self, f64)>, MinigradError> {
        Ok(self
            .tape
            .chain_rule(self.id, *d_output)?
            .into_iter()
            .map(|(id, d)| (Scalar::from_parts(self.tape.clone(), id), d))
            .collect())
    }
}

#[cfg(test)]
#[path = "scalar_test.rs"]
mod tests;
