use super::*;
use crate::autograd::Context;
use crate::scalar::functions::ScalarFunction;
use approx::assert_abs_diff_eq;

#[test]
fn test_central_difference_square() {
    let d = central_difference(|v: &[f64]| v[0] * v[0], &[3.0], 0, DEFAULT_EPSILON).unwrap();
    assert_abs_diff_eq!(d, 6.0, epsilon = 1e-4);
}

#[test]
fn test_central_difference_product_second_arg() {
    let d = central_difference(|v: &[f64]| v[0] * v[1], &[2.0, 5.0], 1, DEFAULT_EPSILON).unwrap();
    assert_abs_diff_eq!(d, 2.0, epsilon = 1e-4);
}

#[test]
fn test_central_difference_f32() {
    let d = central_difference(|v: &[f32]| v[0] * v[0] * v[0], &[2.0f32], 0, 1e-2f32).unwrap();
    assert_abs_diff_eq!(d, 12.0f32, epsilon = 1e-2);
}

#[test]
fn test_central_difference_does_not_mutate_values() {
    let values = [1.5, -2.0, 4.0];
    let mut seen: Vec<Vec<f64>> = Vec::new();
    let _ = central_difference(
        |v: &[f64]| {
            seen.push(v.to_vec());
            v.iter().sum::<f64>()
        },
        &values,
        1,
        0.5,
    )
    .unwrap();
    assert_eq!(values, [1.5, -2.0, 4.0]);
    assert_eq!(seen, vec![vec![1.5, -1.5, 4.0], vec![1.5, -2.5, 4.0]]);
}

#[test]
fn test_central_difference_argument_out_of_bounds() {
    let result = central_difference(|v: &[f64]| v[0], &[1.0, 2.0], 2, DEFAULT_EPSILON);
    assert_eq!(
        result,
        Err(MinigradError::ArgumentIndexOutOfBounds { index: 2, len: 2 })
    );
}

#[test]
fn test_central_difference_zero_epsilon_is_not_validated() {
    let d = central_difference(|v: &[f64]| v[0] * v[0], &[3.0], 0, 0.0).unwrap();
    assert!(d.is_nan());
}

#[test]
fn test_check_grad_passes_for_composite_function() {
    let f = |x: &[Scalar]| -> Result<Scalar, MinigradError> {
        // x0 * sigmoid(x1) + exp(x0) / x1
        let a = x[0].mul(&x[1].sigmoid()?)?;
        let b = x[0].exp()?.div(&x[1])?;
        a.add(&b)
    };
    check_grad(f, &[0.7, 1.3], &GradCheckConfig::default()).unwrap();
}

#[test]
fn test_check_grad_missing_analytical_grad() {
    // The second input never takes part in the output.
    let f = |x: &[Scalar]| x[0].mul(&x[0]);
    let err = check_grad(f, &[1.0, 2.0], &GradCheckConfig::default()).unwrap_err();
    assert_eq!(err, GradCheckError::MissingAnalyticalGrad { input_index: 1 });
}

#[derive(Debug)]
struct WrongSquare;

impl ScalarFunction for WrongSquare {
    fn name(&self) -> &'static str {
        "wrong_square"
    }

    fn arity(&self) -> usize {
        1
    }

    fn forward(&self, ctx: &mut Context<f64>, inputs: &[f64]) -> f64 {
        ctx.save_for_backward([inputs[0]]);
        inputs[0] * inputs[0]
    }

    fn backward(&self, ctx: &Context<f64>, d_output: f64) -> Result<Vec<f64>, MinigradError> {
        // Missing the factor 2.
        Ok(vec![d_output * ctx.saved_tensors()[0]])
    }
}

#[test]
fn test_check_grad_detects_wrong_backward() {
    let f = |x: &[Scalar]| x[0].tape().apply(Box::new(WrongSquare), &[&x[0]]);
    let err = check_grad(f, &[3.0], &GradCheckConfig::default()).unwrap_err();
    match err {
        GradCheckError::GradientMismatch {
            input_index,
            analytical_grad,
            numerical_grad,
            ..
        } => {
            assert_eq!(input_index, 0);
            assert_abs_diff_eq!(analytical_grad, 3.0, epsilon = 1e-12);
            assert_abs_diff_eq!(numerical_grad, 6.0, epsilon = 1e-4);
        }
        other => panic!("Expected GradientMismatch, got {:?}", other),
    }
}

#[test]
fn test_check_grad_forward_error_is_reported() {
    let f = |x: &[Scalar]| {
        let other_tape = Tape::new();
        x[0].add(&other_tape.leaf(1.0))
    };
    let err = check_grad(f, &[1.0], &GradCheckConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        GradCheckError::ForwardPassError(MinigradError::TapeMismatch { .. })
    ));
}

#[test]
fn test_grad_check_config_default() {
    let config = GradCheckConfig::default();
    assert_eq!(config.epsilon, DEFAULT_EPSILON);
    assert_eq!(config.tolerance, 1e-4);
}
