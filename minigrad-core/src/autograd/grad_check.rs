use crate::error::MinigradError;
use crate::scalar::{Scalar, Tape};
use num_traits::Float;
use thiserror::Error;

/// Default step used by [`central_difference`].
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}: analytical grad {analytical_grad:?} != numerical grad {numerical_grad:?}. Difference: {difference:?}")]
    GradientMismatch {
        input_index: usize,
        analytical_grad: f64,
        numerical_grad: f64,
        difference: f64,
    },
    #[error("Forward function execution failed during gradient check: {0}")]
    ForwardPassError(MinigradError),
    #[error("Backward pass execution failed during gradient check: {0}")]
    BackwardPassError(MinigradError),
    #[error("Input {input_index} is a leaf but has no derivative after the backward pass.")]
    MissingAnalyticalGrad { input_index: usize },
    #[error("Numerical gradient is NaN or infinite for input {input_index}: {value:?}")]
    NumericalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Analytical gradient is NaN or infinite for input {input_index}: {value:?}")]
    AnalyticalGradNaNOrInfinite { input_index: usize, value: f64 },
    #[error("Error during numerical differentiation: {0}")]
    NumericalError(MinigradError),
}

impl From<MinigradError> for GradCheckError {
    fn from(err: MinigradError) -> Self {
        GradCheckError::NumericalError(err)
    }
}

/// Step size and tolerance of [`check_grad`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradCheckConfig {
    /// Perturbation applied by the central difference.
    pub epsilon: f64,
    /// Accepted absolute or relative gap between the two gradients.
    pub tolerance: f64,
}

impl Default for GradCheckConfig {
    fn default() -> Self {
        GradCheckConfig {
            epsilon: DEFAULT_EPSILON,
            tolerance: 1e-4,
        }
    }
}

/// Approximates the partial derivative of `f` with respect to argument `arg`.
///
/// Uses the symmetric difference quotient
/// \\[ \frac{f(\ldots, x_{arg} + \epsilon, \ldots) - f(\ldots, x_{arg} - \epsilon, \ldots)}{2\epsilon} \\]
/// whose error is O(epsilon^2) for smooth functions. `values` is left
/// untouched; the function is evaluated on perturbed copies.
///
/// Non-finite results (and `epsilon == 0`) are not validated: whatever NaN or
/// infinity arises is returned.
///
/// # Errors
/// [`MinigradError::ArgumentIndexOutOfBounds`] if `arg >= values.len()`.
pub fn central_difference<T, F>(
    mut f: F,
    values: &[T],
    arg: usize,
    epsilon: T,
) -> Result<T, MinigradError>
where
    T: Float,
    F: FnMut(&[T]) -> T,
{
    if arg >= values.len() {
        return Err(MinigradError::ArgumentIndexOutOfBounds {
            index: arg,
            len: values.len(),
        });
    }

    let mut values_plus = values.to_vec();
    values_plus[arg] = values_plus[arg] + epsilon;

    let mut values_minus = values.to_vec();
    values_minus[arg] = values_minus[arg] - epsilon;

    let two = T::one() + T::one();
    Ok((f(&values_plus) - f(&values_minus)) / (two * epsilon))
}

/// Checks the analytical derivatives of a scalar function against central differences.
///
/// `func` is evaluated once on fresh leaves holding `values`, followed by a
/// backward pass seeded with 1.0. Each leaf derivative is then compared with
/// [`central_difference`] of `func` evaluated on constants (so the numerical
/// probes build no backward state).
pub fn check_grad<F>(func: F, values: &[f64], config: &GradCheckConfig) -> Result<(), GradCheckError>
where
    F: Fn(&[Scalar]) -> Result<Scalar, MinigradError>,
{
    let tape = Tape::new();
    let inputs: Vec<Scalar> = values.iter().map(|&v| tape.leaf(v)).collect();

    let output = func(&inputs).map_err(GradCheckError::ForwardPassError)?;
    output.backward().map_err(GradCheckError::BackwardPassError)?;

    for (i, input) in inputs.iter().enumerate() {
        let analytical_grad = input
            .derivative()
            .ok_or(GradCheckError::MissingAnalyticalGrad { input_index: i })?;

        let mut probe_error: Option<MinigradError> = None;
        let numerical_grad = central_difference(
            |probe_values: &[f64]| {
                let probe = Tape::new();
                let constants: Vec<Scalar> = probe_values.iter().map(|&v| probe.constant(v)).collect();
                match func(&constants) {
                    Ok(out) => out.value(),
                    Err(e) => {
                        probe_error = Some(e);
                        f64::NAN
                    }
                }
            },
            values,
            i,
            config.epsilon,
        )?;
        if let Some(e) = probe_error {
            return Err(GradCheckError::ForwardPassError(e));
        }

        if !numerical_grad.is_finite() {
            return Err(GradCheckError::NumericalGradNaNOrInfinite {
                input_index: i,
                value: numerical_grad,
            });
        }
        if !analytical_grad.is_finite() {
            return Err(GradCheckError::AnalyticalGradNaNOrInfinite {
                input_index: i,
                value: analytical_grad,
            });
        }

        if !approx::relative_eq!(
            analytical_grad,
            numerical_grad,
            epsilon = config.tolerance,
            max_relative = config.tolerance
        ) {
            return Err(GradCheckError::GradientMismatch {
                input_index: i,
                analytical_grad,
                numerical_grad,
                difference: (analytical_grad - numerical_grad).abs(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "grad_check_test.rs"]
mod tests;
