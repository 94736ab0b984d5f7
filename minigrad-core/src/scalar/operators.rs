//! Scalar math kernels shared by the forward and backward passes of
//! [`functions`](super::functions).

/// Tolerance used by [`is_close`].
pub const CLOSE_TOLERANCE: f64 = 1e-2;

/// 1.0 if `x < y`, else 0.0.
pub fn lt(x: f64, y: f64) -> f64 {
    if x < y {
        1.0
    } else {
        0.0
    }
}

/// 1.0 if `x == y`, else 0.0.
pub fn eq(x: f64, y: f64) -> f64 {
    if x == y {
        1.0
    } else {
        0.0
    }
}

pub fn is_close(x: f64, y: f64) -> bool {
    (x - y).abs() < CLOSE_TOLERANCE
}

/// Logistic function, evaluated so that neither branch overflows.
pub fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

pub fn relu(x: f64) -> f64 {
    if x > 0.0 {
        x
    } else {
        0.0
    }
}

pub fn inv(x: f64) -> f64 {
    1.0 / x
}

/// `d * d/dx ln(x)`
pub fn log_back(x: f64, d: f64) -> f64 {
    d / x
}

/// `d * d/dx (1/x)`
pub fn inv_back(x: f64, d: f64) -> f64 {
    -d / (x * x)
}

/// `d * d/dx relu(x)`; the subgradient at 0 is taken as 0.
pub fn relu_back(x: f64, d: f64) -> f64 {
    if x > 0.0 {
        d
    } else {
        0.0
    }
}
