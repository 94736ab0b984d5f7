use super::traits::Dataset;
use minigrad_core::MinigradError;

/// Binary-labelled points in the plane.
///
/// `points[i]` carries label `labels[i]` (0 or 1).
#[derive(Debug, Clone, PartialEq)]
pub struct PointDataset {
    points: Vec<[f64; 2]>,
    labels: Vec<u8>,
}

impl PointDataset {
    /// Creates a dataset from matching point and label vectors.
    ///
    /// # Errors
    ///
    /// Returns `MinigradError::IndexOutOfBounds` when the two lengths differ;
    /// `index` is the first position lacking a partner.
    pub fn new(points: Vec<[f64; 2]>, labels: Vec<u8>) -> Result<Self, MinigradError> {
        if points.len() != labels.len() {
            return Err(MinigradError::IndexOutOfBounds {
                index: points.len().min(labels.len()),
                len: points.len().max(labels.len()),
            });
        }
        Ok(Self { points, labels })
    }

    /// Lengths must already match.
    pub(crate) fn from_parts(points: Vec<[f64; 2]>, labels: Vec<u8>) -> Self {
        debug_assert_eq!(points.len(), labels.len());
        Self { points, labels }
    }

    /// Labels each point with `rule`.
    pub(crate) fn labelled_by<F>(points: Vec<[f64; 2]>, rule: F) -> Self
    where
        F: Fn([f64; 2]) -> bool,
    {
        let labels = points.iter().map(|&p| u8::from(rule(p))).collect();
        Self { points, labels }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Number of points carrying label 1.
    pub fn positives(&self) -> usize {
        self.labels.iter().filter(|&&l| l == 1).count()
    }
}

impl Dataset for PointDataset {
    type Item = ([f64; 2], u8);

    fn get(&self, index: usize) -> Result<Self::Item, MinigradError> {
        match (self.points.get(index), self.labels.get(index)) {
            (Some(&point), Some(&label)) => Ok((point, label)),
            _ => Err(MinigradError::IndexOutOfBounds {
                index,
                len: self.points.len(),
            }),
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

#[cfg(test)]
#[path = "point_dataset_test.rs"]
mod tests;
