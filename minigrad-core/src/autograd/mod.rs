//! # Reverse-mode automatic differentiation
//!
//! - [`Variable`]: the contract any differentiable node implements.
//! - [`Context`]: forward-pass values kept for the backward pass.
//! - [`topological_sort`]: output-to-input ordering of a graph.
//! - [`backpropagate`]: pushes derivatives from an output down to the leaves.
//! - [`grad_check`]: central differences and analytical-vs-numerical checks.

pub mod backward;
pub mod context;
pub mod grad_check;
pub mod graph;
pub mod node_id;
pub mod variable;

pub use backward::backpropagate;
pub use context::Context;
pub use graph::topological_sort;
pub use node_id::{NodeId, NodeIdGenerator};
pub use variable::Variable;
