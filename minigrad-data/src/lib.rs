pub mod datasets;

// Re-export main components
pub use datasets::{circle, diag, make_points, simple, spiral, split, xor};
pub use datasets::{Dataset, DatasetKind, PointDataset};
