//! Synthetic 2D binary-classification datasets.
//!
//! All random generators draw points uniformly from the unit square and label
//! them with a fixed rule. Pass a seeded `StdRng` for reproducible data.

use super::point_dataset::PointDataset;
use rand::Rng;

/// Draws `n` points uniformly from `[0, 1) x [0, 1)`.
pub fn make_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<[f64; 2]> {
    (0..n).map(|_| [rng.gen::<f64>(), rng.gen::<f64>()]).collect()
}

/// Label 1 left of `x1 = 0.5`. Linearly separable.
pub fn simple<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointDataset {
    PointDataset::labelled_by(make_points(n, rng), |[x1, _]| x1 < 0.5)
}

/// Label 1 below the diagonal `x1 + x2 = 0.5`.
pub fn diag<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointDataset {
    PointDataset::labelled_by(make_points(n, rng), |[x1, x2]| x1 + x2 < 0.5)
}

/// Label 1 in the two outer vertical bands `x1 < 0.2` and `x1 > 0.8`.
pub fn split<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointDataset {
    PointDataset::labelled_by(make_points(n, rng), |[x1, _]| x1 < 0.2 || x1 > 0.8)
}

/// Label 1 when `x1` and `x2` lie strictly on opposite sides of 0.5.
pub fn xor<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointDataset {
    PointDataset::labelled_by(make_points(n, rng), |[x1, x2]| {
        (x1 < 0.5 && x2 > 0.5) || (x1 > 0.5 && x2 < 0.5)
    })
}

/// Label 1 outside the circle of squared radius 0.1 centred on `(0.5, 0.5)`.
pub fn circle<R: Rng + ?Sized>(n: usize, rng: &mut R) -> PointDataset {
    PointDataset::labelled_by(make_points(n, rng), |[x1, x2]| {
        let (dx, dy) = (x1 - 0.5, x2 - 0.5);
        dx * dx + dy * dy > 0.1
    })
}

/// Two interleaved spirals, `n / 2` points each: label 0 then label 1.
///
/// Deterministic. For odd `n` the result holds `n - 1` points.
pub fn spiral(n: usize) -> PointDataset {
    let half = n / 2;
    let x = |t: f64| t * t.cos() / 20.0;
    let y = |t: f64| t * t.sin() / 20.0;
    let t_at = |i: usize| 10.0 * (i as f64 / half as f64);

    let first = (5..5 + half).map(|i| {
        let t = t_at(i);
        [x(t) + 0.5, y(t) + 0.5]
    });
    let second = (5..5 + half).map(|i| {
        let t = -t_at(i);
        [y(t) + 0.5, x(t) + 0.5]
    });
    let points: Vec<[f64; 2]> = first.chain(second).collect();

    let mut labels = vec![0u8; half];
    labels.extend(std::iter::repeat(1u8).take(half));

    log::debug!("spiral: generated {} points", points.len());
    PointDataset::from_parts(points, labels)
}

#[cfg(test)]
#[path = "generators_test.rs"]
mod tests;
