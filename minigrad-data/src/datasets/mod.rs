pub mod generators;
pub mod kind;
pub mod point_dataset;
pub mod traits;

pub use generators::{circle, diag, make_points, simple, spiral, split, xor};
pub use kind::DatasetKind;
pub use point_dataset::PointDataset;
pub use traits::Dataset;
