use super::generators;
use super::point_dataset::PointDataset;
use minigrad_core::MinigradError;
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Registry of the available dataset generators, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Simple,
    Diag,
    Split,
    Xor,
    Circle,
    Spiral,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Simple,
        DatasetKind::Diag,
        DatasetKind::Split,
        DatasetKind::Xor,
        DatasetKind::Circle,
        DatasetKind::Spiral,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Simple => "Simple",
            DatasetKind::Diag => "Diag",
            DatasetKind::Split => "Split",
            DatasetKind::Xor => "Xor",
            DatasetKind::Circle => "Circle",
            DatasetKind::Spiral => "Spiral",
        }
    }

    /// Generates `n` samples. `Spiral` ignores `rng`.
    pub fn generate<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> PointDataset {
        log::debug!("Generating {} dataset with {} points", self.name(), n);
        match self {
            DatasetKind::Simple => generators::simple(n, rng),
            DatasetKind::Diag => generators::diag(n, rng),
            DatasetKind::Split => generators::split(n, rng),
            DatasetKind::Xor => generators::xor(n, rng),
            DatasetKind::Circle => generators::circle(n, rng),
            DatasetKind::Spiral => generators::spiral(n),
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetKind {
    type Err = MinigradError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DatasetKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| MinigradError::UnknownDataset(s.to_string()))
    }
}
