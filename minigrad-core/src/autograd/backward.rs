use crate::autograd::graph::topological_sort;
use crate::autograd::{NodeId, Variable};
use crate::error::MinigradError;
use num_traits::Zero;
use std::collections::{HashMap, HashSet};

/// Runs backpropagation on the computation graph ending at `variable`.
///
/// `derivative` is the derivative of the final objective with respect to
/// `variable`. For every leaf reachable from `variable`,
/// [`Variable::accumulate_derivative`] is called exactly once with the total
/// derivative of the objective with respect to that leaf, summed over every
/// path reaching it. Nothing is returned; results live in the leaves.
///
/// Nodes are consumed in [`topological_sort`] order. Because every dependent
/// of a node precedes it in that order, a node's incoming derivative is
/// complete by the time it is processed. A node whose accumulator was never
/// written is processed with `Zero::zero()`.
///
/// Leaves keep accumulating across calls; resetting them between passes is
/// the caller's job.
///
/// # Errors
/// * [`MinigradError::CycleDetected`] from the traversal.
/// * [`MinigradError::ContractViolation`] if a node's `chain_rule` yields a
///   node that is not among its `parents`.
/// * Any error raised by the node implementations themselves.
///
/// No partial-state guarantee is made for leaves when an error is returned.
pub fn backpropagate<V: Variable>(variable: &V, derivative: V::Derivative) -> Result<(), MinigradError> {
    let topological_order = topological_sort(variable)?;

    let mut node_derivatives: HashMap<NodeId, V::Derivative> = HashMap::new();
    node_derivatives.insert(variable.unique_id(), derivative);

    for node in &topological_order {
        let node_id = node.unique_id();
        let node_derivative = node_derivatives
            .remove(&node_id)
            .unwrap_or_else(<V::Derivative as Zero>::zero);

        if node.is_leaf() {
            log::trace!("backpropagate: leaf {} receives {:?}", node_id, node_derivative);
            node.accumulate_derivative(node_derivative)?;
            continue;
        }

        let parent_ids: HashSet<NodeId> = node.parents().iter().map(|p| p.unique_id()).collect();
        for (parent, contribution) in node.chain_rule(&node_derivative)? {
            let parent_id = parent.unique_id();
            if !parent_ids.contains(&parent_id) {
                return Err(MinigradError::ContractViolation {
                    node: node_id,
                    parent: parent_id,
                });
            }
            if parent.is_constant() {
                log::trace!("backpropagate: dropping contribution to constant {}", parent_id);
                continue;
            }
            let previous = node_derivatives
                .remove(&parent_id)
                .unwrap_or_else(<V::Derivative as Zero>::zero);
            node_derivatives.insert(parent_id, previous + contribution);
        }
    }

    log::debug!(
        "backpropagate: processed {} nodes from {}",
        topological_order.len(),
        variable.unique_id()
    );
    Ok(())
}
