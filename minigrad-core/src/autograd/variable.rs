use crate::autograd::NodeId;
use crate::error::MinigradError;
use num_traits::Zero;
use std::fmt::Debug;

/// Capability contract of any differentiable value taking part in the engine.
///
/// A `Variable` is a cheap handle onto one node of a directed acyclic
/// computation graph. Nodes reference their parents (the operands they were
/// computed from); the same parent may be shared by several children, so the
/// graph is a DAG rather than a tree. The engine never creates or destroys
/// nodes: it only asks them for their identity and parents, routes
/// derivatives through [`chain_rule`](Variable::chain_rule) and deposits
/// totals through [`accumulate_derivative`](Variable::accumulate_derivative).
///
/// Node kinds:
/// * **leaf**: no differentiable inputs; the target of derivative accumulation.
/// * **constant**: carries no gradient information; pruned from traversal and
///   never receives or emits a derivative.
/// * **derived**: the result of an operation on other nodes.
pub trait Variable: Clone {
    /// Value type of derivatives flowing through the graph.
    ///
    /// `Zero` provides the additive identity used for nodes whose accumulator
    /// was never written, and the addition used to sum contributions.
    type Derivative: Zero + Clone + Debug;

    /// Stable identity, unique among the nodes of the graph.
    fn unique_id(&self) -> NodeId;

    /// `true` if this node has no differentiable inputs.
    fn is_leaf(&self) -> bool;

    /// `true` if this node carries no gradient information at all.
    fn is_constant(&self) -> bool;

    /// The nodes this node was directly computed from, in operand order.
    /// Empty for leaves and constants.
    fn parents(&self) -> Vec<Self>;

    /// Adds `derivative` to the accumulated gradient held by this leaf.
    ///
    /// # Errors
    /// Implementations return [`MinigradError::NotALeaf`] when called on a
    /// node that is not a leaf.
    fn accumulate_derivative(&self, derivative: Self::Derivative) -> Result<(), MinigradError>;

    /// Applies the local chain rule.
    ///
    /// Given the derivative of the final output with respect to this node,
    /// returns, for each parent, the derivative of the output with respect to
    /// that parent (local derivative times `d_output`). Every returned node
    /// must be one of [`parents`](Variable::parents); the backward pass
    /// rejects anything else with [`MinigradError::ContractViolation`].
    fn chain_rule(
        &self,
        d_output: &Self::Derivative,
    ) -> Result<Vec<(Self, Self::Derivative)>, MinigradError>;
}
