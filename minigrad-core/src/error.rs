use crate::autograd::NodeId;
use thiserror::Error;

/// Custom error type for the minigrad framework.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum MinigradError {
    #[error("Cycle detected in the computation graph: node {node} was reached while still being explored")]
    CycleDetected { node: NodeId },

    #[error("Contract violation: chain_rule of node {node} returned node {parent}, which is not one of its parents")]
    ContractViolation { node: NodeId, parent: NodeId },

    #[error("Cannot accumulate a derivative into node {node}: it is not a leaf")]
    NotALeaf { node: NodeId },

    #[error("Operands of '{operation}' belong to different tapes")]
    TapeMismatch { operation: String },

    #[error("Function '{function}' expects {expected} inputs, got {actual}")]
    ArityMismatch {
        function: String,
        expected: usize,
        actual: usize,
    },

    #[error("Function '{function}' found no saved values for its backward pass")]
    MissingSavedValues { function: String },

    #[error("Argument index {index} is out of bounds for {len} values")]
    ArgumentIndexOutOfBounds { index: usize, len: usize },

    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Unknown dataset: {0}")]
    UnknownDataset(String),
}
