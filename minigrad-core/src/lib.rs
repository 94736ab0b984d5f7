// Main modules of the crate
pub mod autograd;
pub mod error;
pub mod scalar;

pub use autograd::grad_check::{central_difference, check_grad, GradCheckConfig, GradCheckError};
pub use autograd::{backpropagate, topological_sort, Context, NodeId, NodeIdGenerator, Variable};
pub use error::MinigradError;
pub use scalar::{Scalar, Tape};
// Re-export traits required by public functions
pub use num_traits;
