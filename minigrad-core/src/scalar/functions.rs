use crate::autograd::Context;
use crate::error::MinigradError;
use crate::scalar::operators;
use std::fmt::Debug;

/// Defines the forward and backward pass of a differentiable scalar operation.
///
/// Every operation that creates a derived [`Scalar`](super::Scalar) has an
/// associated `ScalarFunction`, stored on the tape next to the node together
/// with the [`Context`] filled during `forward`. The backward pass calls
/// [`backward`](ScalarFunction::backward) with that same context.
pub trait ScalarFunction: Debug {
    /// Name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Number of operands.
    fn arity(&self) -> usize;

    /// Computes the output value, saving in `ctx` whatever `backward` needs.
    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64;

    /// Given dL/dOutput, returns dL/dInput_i for every operand, in operand order.
    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError>;
}

/// Reads the `index`-th value saved by `function`'s forward pass.
fn saved(ctx: &Context<f64>, function: &dyn ScalarFunction, index: usize) -> Result<f64, MinigradError> {
    ctx.saved_tensors()
        .get(index)
        .copied()
        .ok_or_else(|| MinigradError::MissingSavedValues {
            function: function.name().to_string(),
        })
}

#[derive(Debug, Clone, Copy)]
pub struct Add;

impl ScalarFunction for Add {
    fn name(&self) -> &'static str {
        "add"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, _ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        inputs[0] + inputs[1]
    }

    fn backward(&self, _ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        Ok(vec![d_output, d_output])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Mul;

impl ScalarFunction for Mul {
    fn name(&self) -> &'static str {
        "mul"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        ctx.save_for_backward([inputs[0], inputs[1]]);
        inputs[0] * inputs[1]
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let a = saved(ctx, self, 0)?;
        let b = saved(ctx, self, 1)?;
        Ok(vec![d_output * b, d_output * a])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Neg;

impl ScalarFunction for Neg {
    fn name(&self) -> &'static str {
        "neg"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, _ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        -inputs[0]
    }

    fn backward(&self, _ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        Ok(vec![-d_output])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Inv;

impl ScalarFunction for Inv {
    fn name(&self) -> &'static str {
        "inv"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        ctx.save_for_backward([inputs[0]]);
        operators::inv(inputs[0])
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let a = saved(ctx, self, 0)?;
        Ok(vec![operators::inv_back(a, d_output)])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Log;

impl ScalarFunction for Log {
    fn name(&self) -> &'static str {
        "log"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        ctx.save_for_backward([inputs[0]]);
        inputs[0].ln()
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let a = saved(ctx, self, 0)?;
        Ok(vec![operators::log_back(a, d_output)])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Exp;

impl ScalarFunction for Exp {
    fn name(&self) -> &'static str {
        "exp"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        let out = inputs[0].exp();
        ctx.save_for_backward([out]);
        out
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let out = saved(ctx, self, 0)?;
        Ok(vec![d_output * out])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Sigmoid;

impl ScalarFunction for Sigmoid {
    fn name(&self) -> &'static str {
        "sigmoid"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        let out = operators::sigmoid(inputs[0]);
        ctx.save_for_backward([out]);
        out
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let out = saved(ctx, self, 0)?;
        Ok(vec![d_output * out * (1.0 - out)])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Relu;

impl ScalarFunction for Relu {
    fn name(&self) -> &'static str {
        "relu"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        ctx.save_for_backward([inputs[0]]);
        operators::relu(inputs[0])
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        let a = saved(ctx, self, 0)?;
        Ok(vec![operators::relu_back(a, d_output)])
    }
}

/// `1.0` if the first operand is smaller. Piecewise constant, so its derivative is zero.
#[derive(Debug, Clone, Copy)]
pub struct LessThan;

impl ScalarFunction for LessThan {
    fn name(&self) -> &'static str {
        "lt"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, _ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        operators::lt(inputs[0], inputs[1])
    }

    fn backward(&self, _ctx: &Context<f64>, _d_output: f64) -> Result<Vec<f64>, MinigradError> {
        Ok(vec![0.0, 0.0])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Equal;

impl ScalarFunction for Equal {
    fn name(&self) -> &'static str {
        "eq"
    }

    fn arity(&self) -> usize {
        2
    }

    fn forward(&self, _ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        operators::eq(inputs[0], inputs[1])
    }

    fn backward(&self, _ctx: &Context<f64>, _d_output: f64) -> Result<Vec<f64>, MinigradError> {
        Ok(vec![0.0, 0.0])
    }
}

#[cfg(test)]
#[path = "functions_test.rs"]
mod tests;
